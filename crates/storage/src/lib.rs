#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, LocalStore, LocalStoreExt, SessionRecord, SessionRepository, Storage,
    StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
