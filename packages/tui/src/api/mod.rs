pub mod client;

pub use client::{ClientError, ClientResult, VaultApi, VaultClient};
