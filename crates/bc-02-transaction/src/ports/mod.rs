//! # Ports Layer
//!
//! Outbound dependencies of transaction construction.

pub mod outbound;
