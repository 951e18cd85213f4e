pub mod config;
pub mod glass;
pub mod recording;
pub mod renderer;
pub mod style;
pub mod surface;

pub use config::*;
pub use recording::*;
pub use renderer::*;
pub use style::*;
pub use surface::*;
