use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Override for the static frontend directory served at "/".
    pub const PUBLIC_DIR: &str = "PUBLIC_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/cphs.db";
    pub const PUBLIC_DIR: &str = "public";
}

/// Returns the absolute path to the backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// correctly regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the static frontend directory
pub fn public_dir() -> String {
    env::var(env_vars::PUBLIC_DIR).unwrap_or_else(|_| {
        backend_dir()
            .join(defaults::PUBLIC_DIR)
            .to_string_lossy()
            .to_string()
    })
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
        }
    }
}
