//! # Header Relay Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the verification gates
//! └── src/
//!     └── integration/  # End-to-end header verification flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p relay-tests
//!
//! # With verifier logs
//! RUST_LOG=harmony_header_verify=debug cargo test -p relay-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p relay-tests
//! ```
