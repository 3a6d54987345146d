//! # Schnorr Signatures
//!
//! Kyber-compatible Schnorr signatures over any [`Suite`].
//!
//! ```text
//! sign:   k <- random, R = k*B, h = H(R || P || msg), s = k + h*x
//!         signature = marshal(R) || marshal(s)
//! verify: s*B == R + h*P
//! ```
//!
//! `H` is SHA-512 reduced modulo the group order.

use zeroize::Zeroize;

use crate::{CryptoError, Suite};

/// Sign `msg` with the private scalar `private`.
pub fn sign<S: Suite>(suite: &S, private: &S::Scalar, msg: &[u8]) -> Vec<u8> {
    let public = suite.base_mul(private);
    let public_bytes = suite.marshal_point(&public);

    let mut k = suite.random_scalar();
    let r = suite.base_mul(&k);
    let r_bytes = suite.marshal_point(&r);

    let h = suite.hash_to_scalar(&[&r_bytes, &public_bytes, msg]);
    let s = suite.scalar_add(&k, &suite.scalar_mul(private, &h));
    k.zeroize();

    let mut sig = r_bytes;
    sig.extend_from_slice(&suite.marshal_scalar(&s));
    sig
}

/// Verify `sig` on `msg` for the public point `public`.
pub fn verify<S: Suite>(
    suite: &S,
    public: &S::Point,
    msg: &[u8],
    sig: &[u8],
) -> Result<(), CryptoError> {
    let plen = suite.point_len();
    let expected = plen + suite.scalar_len();
    if sig.len() != expected {
        return Err(CryptoError::InvalidSignatureLength {
            expected,
            actual: sig.len(),
        });
    }

    let (r_bytes, s_bytes) = sig.split_at(plen);
    let r = suite
        .unmarshal_point(r_bytes)
        .map_err(|_| CryptoError::InvalidSignature)?;
    let s = suite
        .unmarshal_scalar(s_bytes)
        .map_err(|_| CryptoError::InvalidSignature)?;

    let public_bytes = suite.marshal_point(public);
    let h = suite.hash_to_scalar(&[r_bytes, &public_bytes, msg]);

    let lhs = suite.base_mul(&s);
    let rhs = suite.point_add(&r, &suite.point_mul(public, &h));
    if lhs == rhs {
        Ok(())
    } else {
        Err(CryptoError::SignatureVerificationFailed)
    }
}
