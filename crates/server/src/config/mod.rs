mod server;
mod store;

#[cfg(test)]
mod tests;

pub use server::*;
pub use store::*;

use serde::Deserialize;

/// Top-level configuration for the docshelf server, loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct DocshelfConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store backend configuration.
    #[serde(default)]
    pub store: StoreConfig,
}
