//! # Service Messages
//!
//! Requests and responses of the ByzCoin service, as sent to
//! `ByzCoin/<name>`.

use bc_02_transaction::wire::ClientTransactionProto;
use bc_03_state_proof::wire::ProofProto;

/// Message with a name in the service registry.
pub trait ServiceMessage: prost::Message + Default {
    /// Registered name.
    const NAME: &'static str;
}

/// Request sent to a conode, answered by `Response`.
pub trait ServiceRequest: ServiceMessage {
    type Response: ServiceMessage;
}

macro_rules! service_messages {
    ($($request:ident => $response:ident),* $(,)?) => {
        $(
            impl ServiceMessage for $request {
                const NAME: &'static str = stringify!($request);
            }
            impl ServiceMessage for $response {
                const NAME: &'static str = stringify!($response);
            }
            impl ServiceRequest for $request {
                type Response = $response;
            }
        )*
    };
}

service_messages! {
    AddTxRequest => AddTxResponse,
    GetProof => GetProofResponse,
    GetSignerCounters => GetSignerCountersResponse,
}

/// Submit a transaction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddTxRequest {
    #[prost(sint32, tag = "1")]
    pub version: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub skipchainid: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub transaction: Option<ClientTransactionProto>,
    /// Blocks to wait for inclusion, 0 returns at once
    #[prost(sint32, tag = "4")]
    pub inclusionwait: i32,
}

/// Answer to [`AddTxRequest`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddTxResponse {
    #[prost(sint32, tag = "1")]
    pub version: i32,
}

/// Ask for the proof of a key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProof {
    #[prost(sint32, tag = "1")]
    pub version: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub key: Vec<u8>,
    /// Skipchain id
    #[prost(bytes = "vec", tag = "3")]
    pub id: Vec<u8>,
}

/// Answer to [`GetProof`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProofResponse {
    #[prost(sint32, tag = "1")]
    pub version: i32,
    #[prost(message, optional, tag = "2")]
    pub proof: Option<ProofProto>,
}

/// Ask for the last accepted counter of each signer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSignerCounters {
    /// Identity strings, `type:hex`
    #[prost(string, repeated, tag = "1")]
    pub signerids: Vec<String>,
    #[prost(bytes = "vec", tag = "2")]
    pub skipchainid: Vec<u8>,
}

/// Answer to [`GetSignerCounters`], one counter per requested signer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSignerCountersResponse {
    #[prost(uint64, repeated, tag = "1")]
    pub counters: Vec<u64>,
    /// Index of the block the counters were read from
    #[prost(uint64, tag = "2")]
    pub index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::MessageRegistry;

    fn registered<R: ServiceRequest>(registry: &MessageRegistry) -> bool {
        registry
            .request_path(R::NAME, <R::Response as ServiceMessage>::NAME)
            .is_ok()
    }

    #[test]
    fn test_requests_match_registry() {
        let registry = MessageRegistry::byzcoin();
        assert!(registered::<AddTxRequest>(&registry));
        assert!(registered::<GetProof>(&registry));
        assert!(registered::<GetSignerCounters>(&registry));
        assert_eq!(GetProofResponse::NAME, "GetProofResponse");
    }
}
