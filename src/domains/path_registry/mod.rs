pub mod events;
pub mod index;
pub mod notifier;
pub mod query;
pub mod store;
pub mod types;

pub use events::*;
pub use index::*;
pub use notifier::*;
pub use query::*;
pub use store::*;
pub use types::*;
