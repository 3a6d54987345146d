//! # Protocol Version
//!
//! Every request sent to a conode carries the protocol version. The version
//! also selects how instructions are hashed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// ByzCoin protocol version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(pub i32);

impl Version {
    /// Initial protocol: the invoke command is not part of the instruction hash.
    pub const INITIAL: Version = Version(0);

    /// The invoke command is hashed together with the contract id.
    pub const INSTRUCTION_HASH: Version = Version(1);

    /// True if the invoke command is included in the instruction hash.
    pub fn hashes_invoke_command(self) -> bool {
        self >= Self::INSTRUCTION_HASH
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The version currently deployed on the conodes.
pub const CURRENT_VERSION: Version = Version::INSTRUCTION_HASH;
