//! # Domain Layer
//!
//! Instructions and transactions in their three lifecycle states.

pub mod argument;
pub mod errors;
pub mod instruction;
pub mod transaction;
