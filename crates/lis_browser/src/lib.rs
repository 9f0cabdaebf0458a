pub mod session;

pub use session::{BrowserConfig, Session};
