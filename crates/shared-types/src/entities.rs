//! # Core Identifiers
//!
//! Byte identifiers used throughout the ledger.
//!
//! ## Clusters
//!
//! - **State**: `InstanceId` (key in the global state trie), `DarcId`
//! - **Chain**: `SkipBlockId` (hash of a skipblock, the genesis one names the chain)

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use crate::errors::TypesError;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Length of an [`InstanceId`] in bytes.
pub const INSTANCE_ID_LEN: usize = 32;

// =============================================================================
// CLUSTER A: STATE
// =============================================================================

/// Unique identifier of one instance of a contract.
///
/// The all-zero id is the special key holding the chain configuration.
#[serde_as]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(#[serde_as(as = "Hex")] pub [u8; INSTANCE_ID_LEN]);

impl InstanceId {
    /// The id of the chain configuration instance.
    pub const CONFIG: InstanceId = InstanceId([0u8; INSTANCE_ID_LEN]);

    /// Create from a fixed-size array.
    pub fn new(bytes: [u8; INSTANCE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Copies the first 32 bytes of `buf`; shorter input is zero-padded.
    pub fn from_slice(buf: &[u8]) -> Self {
        let mut id = [0u8; INSTANCE_ID_LEN];
        let n = buf.len().min(INSTANCE_ID_LEN);
        id[..n].copy_from_slice(&buf[..n]);
        Self(id)
    }

    /// Strict conversion: `buf` must be exactly 32 bytes.
    pub fn try_from_slice(buf: &[u8]) -> Result<Self, TypesError> {
        let bytes: [u8; INSTANCE_ID_LEN] =
            buf.try_into().map_err(|_| TypesError::InvalidLength {
                what: "instance id",
                expected: INSTANCE_ID_LEN,
                actual: buf.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let buf = hex::decode(s).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        Self::try_from_slice(&buf)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; INSTANCE_ID_LEN] {
        &self.0
    }

    /// Owned copy of the bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for InstanceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; INSTANCE_ID_LEN]> for InstanceId {
    fn from(bytes: [u8; INSTANCE_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", hex::encode(self.0))
    }
}

/// Identifier of a DARC (hash of its base version).
#[serde_as]
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DarcId(#[serde_as(as = "Hex")] pub Vec<u8>);

impl DarcId {
    /// Create from bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        hex::decode(s)
            .map(Self)
            .map_err(|e| TypesError::InvalidHex(e.to_string()))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True for the empty id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for DarcId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<InstanceId> for DarcId {
    fn from(iid: InstanceId) -> Self {
        Self(iid.to_vec())
    }
}

impl fmt::Display for DarcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for DarcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DarcId({})", hex::encode(&self.0))
    }
}

// =============================================================================
// CLUSTER B: CHAIN
// =============================================================================

/// Hash of a skipblock. The id of the genesis block identifies the ledger.
#[serde_as]
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkipBlockId(#[serde_as(as = "Hex")] pub Vec<u8>);

impl SkipBlockId {
    /// Create from bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        hex::decode(s)
            .map(Self)
            .map_err(|e| TypesError::InvalidHex(e.to_string()))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True if no id has been set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SkipBlockId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for SkipBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for SkipBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SkipBlockId({})", hex::encode(&self.0))
    }
}
