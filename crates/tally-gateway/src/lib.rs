//! Persistence gateway contract and the in-memory reference implementation.

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::MemoryGateway;
pub use store::{Record, RecordStore};
pub use traits::Gateway;

#[cfg(test)]
mod tests;
