mod file_storage;
mod key_value;

pub use file_storage::{FileStorage, Result, StorageError};
pub use key_value::{KeyValueStore, MemoryStorage};

#[cfg(test)]
pub(crate) use key_value::FailingStorage;
