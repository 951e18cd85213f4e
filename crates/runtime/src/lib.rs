pub mod animation;
pub mod frame;

pub use animation::*;
pub use frame::*;
