pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::Config;
pub use error::Error;
pub use models::{PostRecord, PostType};
pub use storage::SnapshotStore;

pub type Result<T> = std::result::Result<T, Error>;
