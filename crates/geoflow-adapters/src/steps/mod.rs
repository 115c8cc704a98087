//! Steps concretos del pipeline de get-features.

pub mod filter;
pub mod load;
pub mod transform;

pub use filter::BboxFilterStep;
pub use load::LoadFeaturesStep;
pub use transform::{AttributeProjectionStep, TagStep};
