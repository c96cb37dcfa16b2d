// Cookbook - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod payload;
pub mod registry;
pub mod resolver;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use entry::{Entry, EntryKind, Ingredient, Recipe, RequiredItem};
pub use error::{CookbookError, Result};
pub use normalize::normalize;
pub use payload::{parse_entry, EntryHeader};
pub use registry::Cookbook;
pub use resolver::{summarize, IngredientTotal, Summary};

#[cfg(feature = "server")]
pub use server::build_router;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
