//! # Leaf Values
//!
//! Every trie leaf stores an encoded [`StateChangeBody`]: the contract that
//! owns the instance, the DARC that guards it, its version and its data.
//! The skipblock `data` field holds a [`DataHeader`] committing to the trie
//! root. The chain configuration instance stores a [`ChainConfig`].

use prost::Message;
use serde::{Deserialize, Serialize};

use super::chain::Roster;
use super::errors::{ChainError, ProofError};

/// Contract id of the configuration instance.
pub const CONFIG_CONTRACT_ID: &str = "config";

/// What a state change did to an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateAction {
    Create = 1,
    Update = 2,
    Remove = 3,
}

impl TryFrom<i32> for StateAction {
    type Error = ProofError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(StateAction::Create),
            2 => Ok(StateAction::Update),
            3 => Ok(StateAction::Remove),
            other => Err(ProofError::UnknownStateAction(other)),
        }
    }
}

/// Value stored in a trie leaf.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateChangeBody {
    #[prost(sint32, tag = "1")]
    pub stateaction: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub contractid: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub value: Vec<u8>,
    #[prost(uint64, tag = "4")]
    pub version: u64,
    #[prost(bytes = "vec", tag = "5")]
    pub darcid: Vec<u8>,
}

impl StateChangeBody {
    /// Body of a state change.
    pub fn new(
        action: StateAction,
        contract_id: &str,
        value: impl Into<Vec<u8>>,
        version: u64,
        darc_id: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            stateaction: action as i32,
            contractid: contract_id.as_bytes().to_vec(),
            value: value.into(),
            version,
            darcid: darc_id.into(),
        }
    }

    /// Decode a leaf value.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, ProofError> {
        Self::decode(buf).map_err(|e| ProofError::Decode(e.to_string()))
    }

    /// Typed state action.
    pub fn action(&self) -> Result<StateAction, ProofError> {
        StateAction::try_from(self.stateaction)
    }

    /// Contract id as text. Invalid UTF-8 is replaced.
    pub fn contract_id(&self) -> String {
        String::from_utf8_lossy(&self.contractid).into_owned()
    }
}

/// Skipblock payload committing to the global state.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataHeader {
    #[prost(bytes = "vec", tag = "1")]
    pub trieroot: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub clienttransactionhash: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub statechangeshash: Vec<u8>,
    /// Nanoseconds since the epoch
    #[prost(sint64, tag = "4")]
    pub timestamp: i64,
}

impl DataHeader {
    /// Decode the `data` of a skipblock.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, ChainError> {
        Self::decode(buf).map_err(|e| ChainError::InvalidHeader(e.to_string()))
    }
}

/// Chain configuration, the value of the config instance.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainConfig {
    #[prost(message, optional, tag = "1")]
    pub roster: Option<Roster>,
    /// Nanoseconds between blocks
    #[prost(sint64, tag = "2")]
    pub blockinterval: i64,
    #[prost(sint32, tag = "3")]
    pub maxblocksize: i32,
    #[prost(string, repeated, tag = "4")]
    pub darccontractids: Vec<String>,
}

impl ChainConfig {
    /// Decode a config instance value.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, ProofError> {
        Self::decode(buf).map_err(|e| ProofError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_action_codes() {
        assert_eq!(StateAction::try_from(2), Ok(StateAction::Update));
        assert_eq!(
            StateAction::try_from(0),
            Err(ProofError::UnknownStateAction(0))
        );
    }

    #[test]
    fn test_state_change_body_decodes() {
        let body = StateChangeBody::new(StateAction::Create, "value", b"data".to_vec(), 4, vec![7; 32]);
        let decoded = StateChangeBody::from_bytes(&body.encode_to_vec()).unwrap();
        assert_eq!(decoded.contract_id(), "value");
        assert_eq!(decoded.action(), Ok(StateAction::Create));
        assert_eq!(decoded.version, 4);
    }

    #[test]
    fn test_garbage_header_rejected() {
        assert!(matches!(
            DataHeader::from_bytes(&[0xff, 0xff]),
            Err(ChainError::InvalidHeader(_))
        ));
    }
}
