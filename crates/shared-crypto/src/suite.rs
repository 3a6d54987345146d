//! # Curve Suite
//!
//! The group arithmetic every signature scheme here is written against.
//! Callers pick a suite and pass it in; nothing reaches for a global curve.
//!
//! `Edwards25519Suite` matches the kyber `ed25519` suite used by the conodes:
//! points are 32-byte compressed Edwards-Y, scalars are 32-byte little-endian
//! and reduced modulo the group order `l`.

use std::fmt;

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use rand::RngCore;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::CryptoError;

/// Point and scalar arithmetic of a prime-order group.
pub trait Suite: Send + Sync + 'static {
    /// Group element.
    type Point: Clone + PartialEq + fmt::Debug + Send + Sync;
    /// Field element modulo the group order.
    type Scalar: Clone + PartialEq + Zeroize + Send + Sync;

    /// Suite name as used in identity strings.
    fn name(&self) -> &'static str;
    /// Length of a marshalled point.
    fn point_len(&self) -> usize;
    /// Length of a marshalled scalar.
    fn scalar_len(&self) -> usize;

    /// `s * B` for the standard base point.
    fn base_mul(&self, s: &Self::Scalar) -> Self::Point;
    /// `s * p`.
    fn point_mul(&self, p: &Self::Point, s: &Self::Scalar) -> Self::Point;
    /// `a + b`.
    fn point_add(&self, a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// `a + b mod l`.
    fn scalar_add(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    /// `a * b mod l`.
    fn scalar_mul(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Uniformly random scalar.
    fn random_scalar(&self) -> Self::Scalar;
    /// SHA-512 over the concatenated parts, reduced into a scalar.
    fn hash_to_scalar(&self, parts: &[&[u8]]) -> Self::Scalar;

    /// Canonical point encoding.
    fn marshal_point(&self, p: &Self::Point) -> Vec<u8>;
    /// Decode a point, rejecting bytes that are not on the curve.
    fn unmarshal_point(&self, bytes: &[u8]) -> Result<Self::Point, CryptoError>;
    /// Canonical scalar encoding.
    fn marshal_scalar(&self, s: &Self::Scalar) -> Vec<u8>;
    /// Decode a scalar, rejecting non-canonical encodings.
    fn unmarshal_scalar(&self, bytes: &[u8]) -> Result<Self::Scalar, CryptoError>;
}

/// The Edwards25519 group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edwards25519Suite;

const ED25519_LEN: usize = 32;

impl Suite for Edwards25519Suite {
    type Point = EdwardsPoint;
    type Scalar = Scalar;

    fn name(&self) -> &'static str {
        "ed25519"
    }

    fn point_len(&self) -> usize {
        ED25519_LEN
    }

    fn scalar_len(&self) -> usize {
        ED25519_LEN
    }

    fn base_mul(&self, s: &Scalar) -> EdwardsPoint {
        EdwardsPoint::mul_base(s)
    }

    fn point_mul(&self, p: &EdwardsPoint, s: &Scalar) -> EdwardsPoint {
        p * s
    }

    fn point_add(&self, a: &EdwardsPoint, b: &EdwardsPoint) -> EdwardsPoint {
        a + b
    }

    fn scalar_add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a + b
    }

    fn scalar_mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a * b
    }

    fn random_scalar(&self) -> Scalar {
        let mut wide = [0u8; 64];
        rand::thread_rng().fill_bytes(&mut wide);
        let s = Scalar::from_bytes_mod_order_wide(&wide);
        wide.zeroize();
        s
    }

    fn hash_to_scalar(&self, parts: &[&[u8]]) -> Scalar {
        let mut h = Sha512::new();
        for part in parts {
            h.update(part);
        }
        let digest: [u8; 64] = h.finalize().into();
        Scalar::from_bytes_mod_order_wide(&digest)
    }

    fn marshal_point(&self, p: &EdwardsPoint) -> Vec<u8> {
        p.compress().to_bytes().to_vec()
    }

    fn unmarshal_point(&self, bytes: &[u8]) -> Result<EdwardsPoint, CryptoError> {
        let arr: [u8; ED25519_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: ED25519_LEN,
            actual: bytes.len(),
        })?;
        CompressedEdwardsY(arr)
            .decompress()
            .ok_or(CryptoError::InvalidPoint)
    }

    fn marshal_scalar(&self, s: &Scalar) -> Vec<u8> {
        s.to_bytes().to_vec()
    }

    fn unmarshal_scalar(&self, bytes: &[u8]) -> Result<Scalar, CryptoError> {
        let arr: [u8; ED25519_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: ED25519_LEN,
            actual: bytes.len(),
        })?;
        Option::<Scalar>::from(Scalar::from_canonical_bytes(arr)).ok_or(CryptoError::InvalidScalar)
    }
}

impl Edwards25519Suite {
    /// The standard base point.
    pub fn base_point(&self) -> EdwardsPoint {
        ED25519_BASEPOINT_POINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_mul_matches_point_mul() {
        let suite = Edwards25519Suite;
        let s = suite.random_scalar();
        assert_eq!(suite.base_mul(&s), suite.point_mul(&suite.base_point(), &s));
    }

    #[test]
    fn test_point_marshal_roundtrip() {
        let suite = Edwards25519Suite;
        let p = suite.base_mul(&suite.random_scalar());
        let bytes = suite.marshal_point(&p);
        assert_eq!(bytes.len(), suite.point_len());
        assert_eq!(suite.unmarshal_point(&bytes).unwrap(), p);
    }

    #[test]
    fn test_unmarshal_point_wrong_length() {
        let suite = Edwards25519Suite;
        assert_eq!(
            suite.unmarshal_point(&[0u8; 31]),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_non_canonical_scalar_rejected() {
        let suite = Edwards25519Suite;
        assert_eq!(
            suite.unmarshal_scalar(&[0xFFu8; 32]),
            Err(CryptoError::InvalidScalar)
        );
    }

    #[test]
    fn test_distributivity() {
        let suite = Edwards25519Suite;
        let a = suite.random_scalar();
        let b = suite.random_scalar();
        let lhs = suite.base_mul(&suite.scalar_add(&a, &b));
        let rhs = suite.point_add(&suite.base_mul(&a), &suite.base_mul(&b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_hash_to_scalar_deterministic() {
        let suite = Edwards25519Suite;
        assert_eq!(
            suite.hash_to_scalar(&[b"a", b"b"]),
            suite.hash_to_scalar(&[b"ab"])
        );
    }
}
