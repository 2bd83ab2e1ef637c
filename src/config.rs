use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables — the API key in particular.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Shared secret checked against the `X-API-Key` header.
    pub api_key: String,
    /// Location of the backing SQLite file.
    pub db_path: PathBuf,
}

impl ServerConfig {
    /// Development fallback; override with the `API_KEY` env var.
    pub const DEFAULT_API_KEY: &'static str = "CHANGE_ME";

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var   | Default                 |
    /// |-----------|-------------------------|
    /// | `HOST`    | `127.0.0.1`             |
    /// | `PORT`    | `3000`                  |
    /// | `API_KEY` | `CHANGE_ME`             |
    /// | `DB_DIR`  | platform data directory |
    /// | `DB_FILE` | `projects.db`           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let api_key = std::env::var("API_KEY").unwrap_or_else(|_| Self::DEFAULT_API_KEY.into());

        let db_dir = std::env::var("DB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_dir());
        let db_file = std::env::var("DB_FILE").unwrap_or_else(|_| "projects.db".into());

        Self {
            host,
            port,
            api_key,
            db_path: db_dir.join(db_file),
        }
    }
}

/// Platform-appropriate data directory, falling back to the working dir.
fn default_db_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "projman")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
