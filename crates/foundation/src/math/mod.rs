pub mod ordering;
pub mod sphere;
pub mod vec;

pub use ordering::*;
pub use sphere::*;
pub use vec::*;
