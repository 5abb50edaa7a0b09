pub mod logger;
pub mod path_registry;
pub mod ports;
pub mod workspace;

pub use logger::*;
pub use path_registry::*;
pub use ports::*;
pub use workspace::*;
