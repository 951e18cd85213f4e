pub mod cache;
pub mod residency;

pub use cache::*;
pub use residency::*;
