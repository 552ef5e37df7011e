pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key/value store holding string entries, modelled on the browser's local
/// storage. Implementations decide where the entries live.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
