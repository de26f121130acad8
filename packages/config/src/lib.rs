// ABOUTME: Configuration and environment variable management for Command Vault
// ABOUTME: Env var names shared by the server and the terminal client, plus the blank-as-unset env reader

pub mod constants;
pub mod env;

pub use env::optional_env;
