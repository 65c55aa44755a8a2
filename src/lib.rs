use anyhow::Result;

// Public modules
pub mod archive;
pub mod assets;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod download;
pub mod error;
pub mod install;
pub mod models;
pub mod platform;
pub mod select;
pub mod utils;

// Re-export commonly used types
pub use assets::{Filter, is_supported_extension, sanitize_name};
pub use error::{ResolveError, SelectError};
pub use models::*;
pub use platform::{PlatformDescriptor, RuntimePlatform, StaticPlatform};
pub use select::{Choice, FixedSelector, PromptSelector, Selector};

// Common type aliases
pub type BinpickResult<T> = Result<T>;
