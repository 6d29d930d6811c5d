pub mod csrf;
pub mod metrics;
