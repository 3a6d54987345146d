//! # BC-04 Ledger Client
//!
//! Talks to a ByzCoin conode on behalf of an application.
//!
//! ## Purpose
//!
//! - fetch signer counters so instructions can be signed with fresh counters
//! - submit signed transactions and wait for their inclusion
//! - fetch proofs and verify them against the trusted skipchain before
//!   anything is read from them
//!
//! ## Module Structure
//!
//! ```text
//! bc-04-ledger-client/
//! ├── domain/          # ClientError
//! ├── ports/           # LedgerClientApi (inbound) + ConodeConnection (outbound)
//! ├── application/     # LedgerClient
//! ├── adapters/        # MockConode (feature "testing")
//! ├── wire.rs          # Service requests and responses
//! └── config.rs        # LedgerClientConfig
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = LedgerClient::new(config, conode, registry, verifier);
//! let signed = tx.update_counters_and_sign(&client, &[vec![&signer]]).await?;
//! client.send_transaction_and_wait(&signed, 10).await?;
//! let instance = client.get_verified_instance(&signed.instructions()[0].derive_id(""), "value").await?;
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod wire;

// Re-exports
pub use application::LedgerClient;
pub use config::LedgerClientConfig;
pub use domain::errors::ClientError;
pub use ports::inbound::LedgerClientApi;
pub use ports::outbound::ConodeConnection;

#[cfg(any(test, feature = "testing"))]
pub use adapters::MockConode;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
