//! # Message Registry
//!
//! Explicit table of the ByzCoin service messages a client exchanges with a
//! conode. Built once and handed to whoever needs it; there is no global
//! registration step.
//!
//! ```rust,ignore
//! let registry = MessageRegistry::byzcoin();
//! let reply = registry.response_for("GetProof")?; // "GetProofResponse"
//! ```

use std::collections::HashMap;

use crate::errors::TypesError;

/// Service the ByzCoin messages belong to.
pub const BYZCOIN_SERVICE: &str = "ByzCoin";

/// Direction of a registered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Sent by the client.
    Request,
    /// Returned by the conode.
    Response,
    /// Nested record, never sent on its own.
    Record,
}

#[derive(Clone, Debug)]
struct Entry {
    kind: MessageKind,
    reply: Option<&'static str>,
}

/// Name -> kind table for one service.
#[derive(Clone, Debug)]
pub struct MessageRegistry {
    service: &'static str,
    entries: HashMap<&'static str, Entry>,
}

impl MessageRegistry {
    /// Empty registry for `service`.
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            entries: HashMap::new(),
        }
    }

    /// The messages of the ByzCoin service.
    pub fn byzcoin() -> Self {
        let mut r = Self::new(BYZCOIN_SERVICE);
        r.request("AddTxRequest", "AddTxResponse");
        r.request("GetProof", "GetProofResponse");
        r.request("GetSignerCounters", "GetSignerCountersResponse");
        for record in [
            "ClientTransaction",
            "Instruction",
            "Spawn",
            "Invoke",
            "Delete",
            "Argument",
            "Proof",
            "InclusionProof",
            "StateChangeBody",
            "ChainConfig",
            "DataHeader",
        ] {
            r.record(record);
        }
        r
    }

    /// Register a request together with the response it expects.
    pub fn request(&mut self, name: &'static str, reply: &'static str) -> &mut Self {
        self.entries.insert(
            name,
            Entry {
                kind: MessageKind::Request,
                reply: Some(reply),
            },
        );
        self.entries.insert(
            reply,
            Entry {
                kind: MessageKind::Response,
                reply: None,
            },
        );
        self
    }

    /// Register a nested record.
    pub fn record(&mut self, name: &'static str) -> &mut Self {
        self.entries.insert(
            name,
            Entry {
                kind: MessageKind::Record,
                reply: None,
            },
        );
        self
    }

    /// Service name.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Kind of a registered message.
    pub fn kind(&self, name: &str) -> Result<MessageKind, TypesError> {
        self.entries
            .get(name)
            .map(|e| e.kind)
            .ok_or_else(|| TypesError::UnknownMessage(name.to_string()))
    }

    /// Response expected for the request `name`.
    pub fn response_for(&self, name: &str) -> Result<&'static str, TypesError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| TypesError::UnknownMessage(name.to_string()))?;
        entry.reply.ok_or(TypesError::UnexpectedKind {
            name: name.to_string(),
            expected: MessageKind::Request,
        })
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Fully qualified path, `<service>/<name>`.
    pub fn path(&self, name: &str) -> Result<String, TypesError> {
        self.kind(name)?;
        Ok(format!("{}/{}", self.service, name))
    }

    /// Path of request `name`, provided the registry pairs it with `reply`.
    pub fn request_path(&self, name: &str, reply: &str) -> Result<String, TypesError> {
        let registered = self.response_for(name)?;
        if registered != reply {
            return Err(TypesError::ReplyMismatch {
                request: name.to_string(),
                expected: reply.to_string(),
                registered: registered.to_string(),
            });
        }
        self.path(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byzcoin_requests_have_replies() {
        let r = MessageRegistry::byzcoin();
        assert_eq!(r.response_for("GetProof").unwrap(), "GetProofResponse");
        assert_eq!(r.response_for("AddTxRequest").unwrap(), "AddTxResponse");
        assert_eq!(
            r.response_for("GetSignerCounters").unwrap(),
            "GetSignerCountersResponse"
        );
        assert_eq!(r.kind("GetProofResponse").unwrap(), MessageKind::Response);
    }

    #[test]
    fn test_unknown_message_rejected() {
        let r = MessageRegistry::byzcoin();
        assert_eq!(
            r.kind("DownloadState"),
            Err(TypesError::UnknownMessage("DownloadState".into()))
        );
        assert!(r.path("Nope").is_err());
    }

    #[test]
    fn test_record_has_no_reply() {
        let r = MessageRegistry::byzcoin();
        assert!(matches!(
            r.response_for("Instruction"),
            Err(TypesError::UnexpectedKind { .. })
        ));
    }

    #[test]
    fn test_request_path_checks_reply() {
        let r = MessageRegistry::byzcoin();
        assert_eq!(
            r.request_path("GetProof", "GetProofResponse").unwrap(),
            "ByzCoin/GetProof"
        );
        assert_eq!(
            r.request_path("GetProof", "AddTxResponse"),
            Err(TypesError::ReplyMismatch {
                request: "GetProof".into(),
                expected: "AddTxResponse".into(),
                registered: "GetProofResponse".into(),
            })
        );
        assert!(matches!(
            r.request_path("GetProofResponse", "GetProofResponse"),
            Err(TypesError::UnexpectedKind { .. })
        ));
    }

    #[test]
    fn test_path() {
        let r = MessageRegistry::byzcoin();
        assert_eq!(r.path("GetProof").unwrap(), "ByzCoin/GetProof");
    }
}
