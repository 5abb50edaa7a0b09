pub mod definition;
pub mod store;
pub mod types;

pub use definition::*;
pub use store::*;
pub use types::*;
