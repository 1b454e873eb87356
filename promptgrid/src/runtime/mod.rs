pub mod config;
pub mod events;
pub mod surface;

pub use config::*;
pub use events::*;
pub use surface::*;
