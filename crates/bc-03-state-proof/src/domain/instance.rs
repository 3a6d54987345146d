//! # Instance
//!
//! Snapshot of a contract instance read from a matching proof.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{DarcId, InstanceId};

use super::errors::ProofError;
use super::proof::Proof;

/// A contract instance as stored in the global state.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub contract_id: String,
    pub darc_id: DarcId,
    pub version: u64,
    #[serde_as(as = "Hex")]
    pub data: Vec<u8>,
}

impl Instance {
    /// Read instance `iid` from `proof`.
    ///
    /// The proof is only checked to match `iid`; verifying it against the
    /// chain is up to the caller.
    pub fn from_proof(proof: &Proof, iid: &InstanceId) -> Result<Self, ProofError> {
        if proof.inclusion.key() != iid.as_bytes() || !proof.exists(iid.as_bytes())? {
            return Err(ProofError::InstanceNotFound(*iid));
        }
        let body = proof.state_change_body()?;
        Ok(Self {
            id: *iid,
            contract_id: body.contract_id(),
            darc_id: DarcId::new(body.darcid),
            version: body.version,
            data: body.value,
        })
    }
}
