pub mod error;
pub mod models;
pub mod repo;
pub mod search;

mod memory;
pub use memory::MemoryStore;

mod postgres;
pub use postgres::PgStore;

pub use error::StoreError;
pub use models::{ExternalProfile, NewNote, Note, NoteChanges, User};
pub use repo::{NoteStore, UserDirectory};
pub use search::sanitize_query;
