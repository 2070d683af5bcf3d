//! Sale Completion - Record Units Sold
//!
//! Forwards the sale to the sold-units counter and builds the
//! confirmation. Input is trusted as-is: validating quantity or
//! product name would change the published counter values.

use tracing::info;

use crate::domain::{Message, Sale};
use crate::ports::telemetry::SalesMetrics;

/// Record `sale` and return the confirmation payload.
pub fn complete_sale(metrics: &dyn SalesMetrics, sale: &Sale) -> Message {
    metrics.record_sale(sale);

    info!(
        product = %sale.product_name,
        quantity = sale.quantity,
        "Sale completed"
    );

    sale.confirmation()
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;

    mock! {
        pub Sales {}

        impl SalesMetrics for Sales {
            fn record_sale(&self, sale: &Sale);
        }
    }

    #[test]
    fn test_complete_sale_records_once() {
        let mut metrics = MockSales::new();
        metrics
            .expect_record_sale()
            .with(eq(Sale::new("Widget", 5)))
            .times(1)
            .return_const(());

        let message = complete_sale(&metrics, &Sale::new("Widget", 5));
        assert_eq!(message.message, "5 unidades de Widget vendidas.");
    }

    #[test]
    fn test_complete_sale_forwards_unvalidated_input() {
        let mut metrics = MockSales::new();
        metrics
            .expect_record_sale()
            .with(eq(Sale::new("", -4)))
            .times(1)
            .return_const(());

        let message = complete_sale(&metrics, &Sale::new("", -4));
        assert_eq!(message.message, "-4 unidades de  vendidas.");
    }
}
