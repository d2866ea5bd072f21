//! # Configuration
//!
//! Folio configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Command-line flags** (`--backend`, `--bind`), applied by the binary.
//! 2. **Environment variables**: `FOLIO_BACKEND`, `FOLIO_DOCUMENT_PATH`,
//!    `FOLIO_TABLE_PATH`, `FOLIO_BIND`.
//! 3. **Explicit file** passed with `--config`, otherwise `./folio.toml`.
//! 4. **User config**: `folio.toml` in the OS config directory (via `directories`).
//! 5. **Compiled defaults**.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `document` | `document` (JSON file) or `table` (SQLite) |
//! | `document_path` | `data/feedback.json` | File used by the document backend |
//! | `table_path` | `data/feedback.db` | Database used by the table backend |
//! | `bind` | `127.0.0.1:5002` | Address `folio serve` listens on |

use crate::error::{FolioError, Result};
use crate::store::Backend;
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "folio.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Storage backend: "document" or "table".
    #[config(env = "FOLIO_BACKEND", default = "document")]
    pub backend: String,

    /// JSON file holding every entry (document backend).
    #[config(env = "FOLIO_DOCUMENT_PATH", default = "data/feedback.json")]
    pub document_path: PathBuf,

    /// SQLite database (table backend).
    #[config(env = "FOLIO_TABLE_PATH", default = "data/feedback.db")]
    pub table_path: PathBuf,

    /// Address the HTTP server binds to.
    #[config(env = "FOLIO_BIND", default = "127.0.0.1:5002")]
    pub bind: String,
}

impl FolioConfig {
    /// The compiled defaults alone, with no file or environment layer.
    pub fn defaults() -> Result<Self> {
        Self::builder()
            .load()
            .map_err(|e| FolioError::Config(e.to_string()))
    }

    /// Load the layered configuration. `explicit`, when given, must exist and
    /// replaces the `./folio.toml` lookup.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(FolioError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                builder = builder.file(path);
            }
            None => builder = builder.file(CONFIG_FILENAME),
        }

        if let Some(user_file) = user_config_file() {
            builder = builder.file(user_file);
        }

        builder
            .load()
            .map_err(|e| FolioError::Config(e.to_string()))
    }

    /// The configured backend, parsed.
    pub fn backend(&self) -> Result<Backend> {
        self.backend.parse()
    }
}

fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "folio", "folio").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
