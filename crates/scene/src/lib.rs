pub mod camera;
pub mod cloud;
pub mod config;
pub mod files;
pub mod points;
pub mod projection;

pub use camera::*;
pub use cloud::*;
pub use config::*;
pub use files::*;
pub use points::*;
pub use projection::*;
