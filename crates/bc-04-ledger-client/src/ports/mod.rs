//! # Ports Layer
//!
//! - **Inbound**: what the ledger client offers (`LedgerClientApi`)
//! - **Outbound**: the conode it talks to (`ConodeConnection`)

pub mod inbound;
pub mod outbound;
