//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the relay calls
//! - **Outbound (Driven)**: Collaborators the verifier needs

pub mod inbound;
pub mod outbound;
