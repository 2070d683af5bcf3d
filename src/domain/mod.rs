//! Domain layer - Sales and request-labeling models.
//!
//! Pure data types with no knowledge of HTTP servers or metric
//! registries (hexagonal architecture inner ring).

pub mod labels;
pub mod sale;

pub use labels::RouteLabels;
pub use sale::{Message, Sale};
