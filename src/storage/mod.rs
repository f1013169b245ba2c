//! Storage implementations of the data-source contract

pub mod in_memory;

pub use in_memory::InMemorySource;
