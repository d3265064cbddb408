//! Global constants of the application.

pub const DEFAULT_DB_PATH: &str = "./data/lmn.yaml"; // Store used when nothing else is configured.
pub const DB_PATH_ENV: &str = "LMN_DB_PATH"; // Environment variable overriding the store path.
