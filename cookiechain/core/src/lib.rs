//! # Cookiechain
//!
//! Bootstrap client for the Cookiechain registry contract. The `cookiechain-core` crate connects
//! to a Starknet node, derives a signing identity from an injected secret, loads the contract ABI
//! and runs a read-only query against the deployed contract. Refer to the `cookiechain` crate for
//! the executable binary.

/// Bootstrap configuration passed into the sequencer.
pub mod config;

/// Network connector abstraction and the Starknet JSON-RPC implementation.
pub mod network;

/// Signing identity derivation.
pub mod identity;

/// ABI loading and contract handles.
pub mod contract;

/// The three-step bootstrap sequence.
pub mod sequencer;

mod errors;
pub use errors::{BoxError, Error, Result};

/// Internal utilities.
mod utils;
pub use utils::{format_chain_id, parse_felt};
