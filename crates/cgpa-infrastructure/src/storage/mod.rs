//! Storage layer for atomic file operations and key/value slots.

mod atomic_file;
mod key_value;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub(crate) use key_value::encode_file_stem;
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
