//! envprint Integration Test Infrastructure
//!
//! This crate provides integration tests for the collect-then-hash flows:
//!
//! - Collection: scripted hosts -> capability records
//! - Digesting: records -> canonical text -> SHA-256
//! - **Determinism**: identical hosts always produce identical digests
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p envprint-tests
//! ```
//!
//! ## Scripted Hosts
//!
//! ```rust,ignore
//! use envprint_tests::mock::ScriptedHost;
//!
//! let host = ScriptedHost::desktop().without_audio();
//! let fp = collect_and_hash_graphics(&host)?;
//! ```

pub mod determinism;
pub mod mock;

pub use determinism::{verify_determinism, DeterminismResult};
pub use mock::{HostEvent, ScriptedHost};
