pub mod fonts;
pub mod metrics;
pub mod wrap;
