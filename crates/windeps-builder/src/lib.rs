pub mod builddir;
pub mod cmake;
pub mod error;
pub mod exec;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod log_sanitize;
pub mod manifest;
pub mod msbuild;
pub mod pipeline;
pub mod target;

pub use error::{Error, Result};
