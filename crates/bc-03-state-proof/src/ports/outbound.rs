//! # Outbound Ports
//!
//! How a forward link signature is checked. The collective signature scheme
//! belongs to the skipchain, so [`Proof::verify`](crate::Proof::verify)
//! takes the check as a capability.

use shared_crypto::{schnorr, Suite};
use tracing::debug;

use crate::domain::chain::{ForwardLink, Roster};

/// Forward link signature check - outbound port.
pub trait ForwardLinkVerifier: Send + Sync {
    /// True if `roster` signed `link`.
    fn verify_link(&self, link: &ForwardLink, roster: &Roster) -> bool;
}

/// Checks a Schnorr signature by the roster's aggregate key over the link hash.
#[derive(Clone, Debug, Default)]
pub struct SchnorrLinkVerifier<S: Suite> {
    suite: S,
}

impl<S: Suite> SchnorrLinkVerifier<S> {
    /// Verifier over `suite`.
    pub fn new(suite: S) -> Self {
        Self { suite }
    }
}

impl<S: Suite> ForwardLinkVerifier for SchnorrLinkVerifier<S> {
    fn verify_link(&self, link: &ForwardLink, roster: &Roster) -> bool {
        let Some(sig) = &link.signature else {
            debug!("forward link is unsigned");
            return false;
        };
        if sig.msg != link.hash() {
            debug!("forward link signature covers another message");
            return false;
        }
        let Ok(aggregate) = self.suite.unmarshal_point(&roster.aggregate) else {
            debug!("roster aggregate is not a point");
            return false;
        };
        schnorr::verify(&self.suite, &aggregate, &sig.msg, &sig.sig).is_ok()
    }
}
