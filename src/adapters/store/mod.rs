//! Store adapters: sanitizer and in-memory implementation of the port.

mod in_memory;
mod sanitize;

pub use in_memory::InMemoryProjectStore;
pub use sanitize::{sanitize, sanitize_fields};
