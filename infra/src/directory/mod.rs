//! Account directory implementations

mod memory;


pub use memory::{AccountRecord, InMemoryAccountDirectory};
