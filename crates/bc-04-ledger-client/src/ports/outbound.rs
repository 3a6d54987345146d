//! # Outbound Ports
//!
//! The conode the client talks to. One method per ByzCoin request.

use async_trait::async_trait;

use crate::domain::errors::ClientError;
use crate::wire::{
    AddTxRequest, AddTxResponse, GetProof, GetProofResponse, GetSignerCounters,
    GetSignerCountersResponse,
};

/// Conode connection - outbound port.
#[async_trait]
pub trait ConodeConnection: Send + Sync {
    /// `ByzCoin/AddTxRequest`
    async fn add_transaction(&self, request: AddTxRequest) -> Result<AddTxResponse, ClientError>;

    /// `ByzCoin/GetProof`
    async fn get_proof(&self, request: GetProof) -> Result<GetProofResponse, ClientError>;

    /// `ByzCoin/GetSignerCounters`
    async fn get_signer_counters(
        &self,
        request: GetSignerCounters,
    ) -> Result<GetSignerCountersResponse, ClientError>;

    /// Address of the conode (for logging).
    fn address(&self) -> &str;
}
