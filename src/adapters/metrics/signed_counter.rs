//! Counter family that accepts any signed increment.
//!
//! `prometheus::IntCounterVec` rejects negative deltas, but sale
//! quantities are forwarded without validation. This collector stores
//! values in a float `GaugeVec` and re-labels the gathered families as
//! `counter`, so the exposition keeps the counter type while `add`
//! takes whatever quantity the caller supplied. Float storage never
//! wraps: totals past `i64::MAX` keep growing (with f64 precision).

use prometheus::core::{Collector, Desc};
use prometheus::proto::{self, MetricFamily, MetricType};
use prometheus::{GaugeVec, Opts};

/// Signed counter vector exposed with `# TYPE <name> counter`.
#[derive(Clone)]
pub struct SignedCounterVec {
    inner: GaugeVec,
}

impl SignedCounterVec {
    /// Create an unregistered counter vector.
    pub fn new(opts: Opts, label_names: &[&str]) -> prometheus::Result<Self> {
        Ok(Self {
            inner: GaugeVec::new(opts, label_names)?,
        })
    }

    /// Add `delta` to the series identified by `label_values`.
    #[allow(clippy::cast_precision_loss)]
    pub fn add(&self, label_values: &[&str], delta: i64) {
        self.inner.with_label_values(label_values).add(delta as f64);
    }

    /// Current value of one series (zero if it was never touched).
    pub fn get(&self, label_values: &[&str]) -> f64 {
        self.inner.with_label_values(label_values).get()
    }
}

impl Collector for SignedCounterVec {
    fn desc(&self) -> Vec<&Desc> {
        self.inner.desc()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = self.inner.collect();
        for family in &mut families {
            family.set_field_type(MetricType::COUNTER);
            for metric in family.mut_metric().iter_mut() {
                let mut counter = proto::Counter::default();
                counter.set_value(metric.get_gauge().get_value());
                metric.clear_gauge();
                metric.set_counter(counter);
            }
        }
        families
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> SignedCounterVec {
        SignedCounterVec::new(Opts::new("test_sold_total", "test"), &["product_name"])
            .unwrap()
    }

    #[test]
    fn test_add_accumulates_signed_deltas() {
        let c = counter();
        c.add(&["Widget"], 5);
        c.add(&["Widget"], -7);
        c.add(&["Widget"], 0);
        assert!((c.get(&["Widget"]) + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_past_i64_max_does_not_wrap() {
        let c = counter();
        c.add(&["Widget"], i64::MAX);
        c.add(&["Widget"], i64::MAX);

        let total = c.get(&["Widget"]);
        assert!(total > 0.0);
        assert!((total / 2.0 - 9.223_372_036_854_776e18).abs() < 1e6);
    }

    #[test]
    fn test_collect_reports_counter_type() {
        let c = counter();
        c.add(&["Gadget"], 3);

        let families = c.collect();
        assert_eq!(families.len(), 1);
        let family = &families[0];
        assert_eq!(family.get_field_type(), MetricType::COUNTER);
        let metric = &family.get_metric()[0];
        assert!((metric.get_counter().get_value() - 3.0).abs() < f64::EPSILON);
        assert!(!metric.has_gauge());
    }
}
