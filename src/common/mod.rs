pub mod composite_key;
pub mod error;
pub mod event;

pub use error::*;
pub use event::*;
