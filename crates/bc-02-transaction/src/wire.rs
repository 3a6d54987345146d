//! # Wire Records
//!
//! Protobuf form of client transactions as the ByzCoin service expects them.
//! Only signed transactions are converted to the wire; decoding validates
//! the result back into a [`ClientTransaction<Signed>`].
//!
//! ```text
//! Instruction {
//!     1: instanceid        bytes
//!     2: spawn             Spawn    (exactly one of 2, 3, 4)
//!     3: invoke            Invoke
//!     4: delete            Delete
//!     5: signercounter     repeated uint64
//!     6: signeridentities  repeated darc.Identity
//!     7: signatures        repeated bytes
//! }
//! ```

use bc_01_darc_identity::wire::IdentityProto;
use bc_01_darc_identity::Identity;
use prost::Message;
use shared_types::{InstanceId, Version, CURRENT_VERSION};

use crate::domain::argument::{Argument, Arguments};
use crate::domain::errors::TransactionError;
use crate::domain::instruction::{Action, Instruction, Signed};
use crate::domain::transaction::ClientTransaction;

/// The `ClientTransaction` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientTransactionProto {
    #[prost(message, repeated, tag = "1")]
    pub instructions: Vec<InstructionProto>,
}

/// The `Instruction` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstructionProto {
    #[prost(bytes = "vec", tag = "1")]
    pub instanceid: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub spawn: Option<SpawnProto>,
    #[prost(message, optional, tag = "3")]
    pub invoke: Option<InvokeProto>,
    #[prost(message, optional, tag = "4")]
    pub delete: Option<DeleteProto>,
    #[prost(uint64, repeated, tag = "5")]
    pub signercounter: Vec<u64>,
    #[prost(message, repeated, tag = "6")]
    pub signeridentities: Vec<IdentityProto>,
    #[prost(bytes = "vec", repeated, tag = "7")]
    pub signatures: Vec<Vec<u8>>,
}

/// The `Spawn` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpawnProto {
    #[prost(string, tag = "1")]
    pub contractid: String,
    #[prost(message, repeated, tag = "2")]
    pub args: Vec<ArgumentProto>,
}

/// The `Invoke` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeProto {
    #[prost(string, tag = "1")]
    pub contractid: String,
    #[prost(string, tag = "2")]
    pub command: String,
    #[prost(message, repeated, tag = "3")]
    pub args: Vec<ArgumentProto>,
}

/// The `Delete` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteProto {
    #[prost(string, tag = "1")]
    pub contractid: String,
}

/// The `Argument` message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArgumentProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

fn args_to_wire(args: &Arguments) -> Vec<ArgumentProto> {
    args.iter()
        .map(|a| ArgumentProto {
            name: a.name().to_string(),
            value: a.value().to_vec(),
        })
        .collect()
}

fn args_from_wire(args: Vec<ArgumentProto>) -> Arguments {
    args.into_iter()
        .map(|a| Argument::new(a.name, a.value))
        .collect()
}

// =============================================================================
// INSTRUCTION
// =============================================================================

impl From<&Instruction<Signed>> for InstructionProto {
    fn from(instr: &Instruction<Signed>) -> Self {
        let mut out = InstructionProto {
            instanceid: instr.instance_id().to_vec(),
            signercounter: instr.signer_counters().to_vec(),
            signeridentities: instr
                .signer_identities()
                .iter()
                .map(IdentityProto::from)
                .collect(),
            signatures: instr.signatures().to_vec(),
            ..Default::default()
        };
        match instr.operation() {
            Action::Spawn { contract_id, args } => {
                out.spawn = Some(SpawnProto {
                    contractid: contract_id.clone(),
                    args: args_to_wire(args),
                })
            }
            Action::Invoke {
                contract_id,
                command,
                args,
            } => {
                out.invoke = Some(InvokeProto {
                    contractid: contract_id.clone(),
                    command: command.clone(),
                    args: args_to_wire(args),
                })
            }
            Action::Delete { contract_id } => {
                out.delete = Some(DeleteProto {
                    contractid: contract_id.clone(),
                })
            }
        }
        out
    }
}

impl Instruction<Signed> {
    /// Wire form.
    pub fn to_wire(&self) -> InstructionProto {
        InstructionProto::from(self)
    }

    /// Validate a decoded instruction, hashing it with `version`.
    pub fn from_wire(p: InstructionProto, version: Version) -> Result<Self, TransactionError> {
        let instance_id = InstanceId::try_from_slice(&p.instanceid)
            .map_err(|_| TransactionError::InvalidInstanceId(p.instanceid.len()))?;
        let action = match (p.spawn, p.invoke, p.delete) {
            (Some(s), None, None) => Action::Spawn {
                contract_id: s.contractid,
                args: args_from_wire(s.args),
            },
            (None, Some(i), None) => Action::Invoke {
                contract_id: i.contractid,
                command: i.command,
                args: args_from_wire(i.args),
            },
            (None, None, Some(d)) => Action::Delete {
                contract_id: d.contractid,
            },
            _ => return Err(TransactionError::InvalidAction),
        };
        let identities = p
            .signeridentities
            .into_iter()
            .map(Identity::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Instruction::from_parts(
            instance_id,
            action,
            version,
            identities,
            p.signercounter,
            p.signatures,
        )
    }
}

impl TryFrom<InstructionProto> for Instruction<Signed> {
    type Error = TransactionError;

    fn try_from(p: InstructionProto) -> Result<Self, Self::Error> {
        Instruction::from_wire(p, CURRENT_VERSION)
    }
}

// =============================================================================
// CLIENT TRANSACTION
// =============================================================================

impl ClientTransaction<Signed> {
    /// Wire form.
    pub fn to_wire(&self) -> ClientTransactionProto {
        ClientTransactionProto {
            instructions: self.instructions().iter().map(InstructionProto::from).collect(),
        }
    }

    /// Protobuf encoding.
    pub fn encode(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Validate a decoded transaction, hashing it with `version`.
    pub fn from_wire(p: ClientTransactionProto, version: Version) -> Result<Self, TransactionError> {
        let instructions = p
            .instructions
            .into_iter()
            .map(|i| Instruction::from_wire(i, version))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ClientTransaction::from_signed(instructions))
    }

    /// Decode and validate protobuf bytes.
    pub fn decode(buf: &[u8]) -> Result<Self, TransactionError> {
        let p = ClientTransactionProto::decode(buf)
            .map_err(|e| TransactionError::Decode(e.to_string()))?;
        Self::try_from(p)
    }
}

impl TryFrom<ClientTransactionProto> for ClientTransaction<Signed> {
    type Error = TransactionError;

    fn try_from(p: ClientTransactionProto) -> Result<Self, Self::Error> {
        ClientTransaction::from_wire(p, CURRENT_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_01_darc_identity::{Ed25519Signer, Signer};

    fn signed_tx() -> (ClientTransaction<Signed>, Ed25519Signer) {
        let alice = Ed25519Signer::generate();
        let tx = ClientTransaction::make(vec![
            Instruction::create_spawn(
                InstanceId::new([1u8; 32]),
                "value",
                Arguments::new().with("value", b"v"),
            ),
            Instruction::create_delete(InstanceId::new([2u8; 32]), "value"),
        ]);
        let signed = tx.fill_signers_and_sign_with(&[1], &[&alice]).unwrap();
        (signed, alice)
    }

    #[test]
    fn test_decoded_transaction_keeps_hash_and_signatures() {
        let (signed, alice) = signed_tx();
        let decoded = ClientTransaction::<Signed>::decode(&signed.encode()).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.hash(), signed.hash());
        let digest = decoded.hash();
        assert!(alice
            .identity()
            .verify(&digest, &decoded.instructions()[1].signatures()[0]));
    }

    #[test]
    fn test_wire_field_layout() {
        let (signed, _) = signed_tx();
        let wire = signed.to_wire();
        assert!(wire.instructions[0].spawn.is_some());
        assert!(wire.instructions[1].delete.is_some());
        assert_eq!(wire.instructions[1].signercounter, vec![2]);
        assert_eq!(wire.instructions[0].signeridentities.len(), 1);
    }

    #[test]
    fn test_two_actions_rejected() {
        let (signed, _) = signed_tx();
        let mut wire = signed.to_wire();
        wire.instructions[0].delete = Some(DeleteProto {
            contractid: "value".into(),
        });
        assert_eq!(
            ClientTransaction::<Signed>::try_from(wire),
            Err(TransactionError::InvalidAction)
        );
    }

    #[test]
    fn test_missing_signature_rejected() {
        let (signed, _) = signed_tx();
        let mut wire = signed.to_wire();
        wire.instructions[0].signatures.clear();
        assert!(matches!(
            ClientTransaction::<Signed>::try_from(wire),
            Err(TransactionError::MalformedSigners {
                identities: 1,
                counters: 1,
                signatures: 0
            })
        ));
    }

    #[test]
    fn test_short_instance_id_rejected() {
        let (signed, _) = signed_tx();
        let mut wire = signed.to_wire();
        wire.instructions[0].instanceid.truncate(5);
        assert_eq!(
            ClientTransaction::<Signed>::try_from(wire),
            Err(TransactionError::InvalidInstanceId(5))
        );
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(
            ClientTransaction::<Signed>::decode(&[0xff, 0xff, 0xff]),
            Err(TransactionError::Decode(_))
        ));
    }
}
