//! # Adapters
//!
//! `ConodeConnection` implementations. The in-memory conode backs tests
//! and demos; it is behind the `testing` feature.

#[cfg(any(test, feature = "testing"))]
pub mod mock_conode;

#[cfg(any(test, feature = "testing"))]
pub use mock_conode::MockConode;
