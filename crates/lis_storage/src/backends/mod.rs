pub mod local;
pub mod memory;

#[cfg(feature = "gcs")]
pub mod gcs;

pub use local::LocalStore;
pub use memory::MemoryStore;

#[cfg(feature = "gcs")]
pub use gcs::GcsStore;
