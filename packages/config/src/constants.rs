// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Command Vault

// Server Configuration
pub const PORT: &str = "PORT";
pub const DB_PATH: &str = "DB_PATH";
pub const CLIENT_DIST: &str = "CLIENT_DIST";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Terminal Client Configuration
pub const CMDVAULT_SERVER_URL: &str = "CMDVAULT_SERVER_URL";

// Defaults
pub const DEFAULT_PORT: u16 = 5179;
pub const DEFAULT_DB_PATH: &str = "./data/command-vault.db";
pub const DEFAULT_CLIENT_DIST: &str = "../client/dist";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5179";
