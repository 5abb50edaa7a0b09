pub mod file_ledger;
pub mod memory_ledger;

pub use file_ledger::*;
pub use memory_ledger::*;
