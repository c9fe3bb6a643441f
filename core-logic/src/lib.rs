//! # Core Logic - Shared Utilities for the Node-Reward Bot
//!
//! This crate provides the utilities shared by the bot binaries: typed
//! errors, logging setup, bounded retry, and the wallet/proxy stores.
//!
//! ## Modules
//!
//! - [`error`] - Typed error handling with thiserror
//! - `utils` - Utility modules (logger, retry, wallet and proxy stores)

pub mod error;
pub(crate) mod utils;

pub use error::{ConfigError, CoreError, NetworkError, WalletError};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{setup_logger, ProxyEndpoint, ProxyKind, ProxyManager, WalletManager, WalletRecord};

// Export retry utilities for testing
pub use utils::retry::{with_retry, RetryConfig};
