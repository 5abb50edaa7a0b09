pub mod client;
pub mod contract;
pub mod response;
pub mod router;

pub use client::*;
pub use contract::*;
pub use response::*;
pub use router::*;
