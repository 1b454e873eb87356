pub mod background;
pub mod layout;

pub use background::*;
pub use layout::*;
