//! Use Cases Layer - Application Business Logic
//!
//! Use cases:
//! - `sales`: record a completed sale and build its confirmation

pub mod sales;
