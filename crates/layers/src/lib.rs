pub mod labels;
pub mod links;
pub mod symbology;

pub use labels::*;
pub use links::*;
pub use symbology::*;
