//! # gatehouse-contracts
//!
//! Shared types and contracts for the Gatehouse gate scan resolver.
//!
//! All crates in the workspace import from here. The only logic in this
//! crate is payload decoding, which has to live next to the payload types so
//! that no other crate can construct a payload from unchecked text.

pub mod entry;
pub mod error;
pub mod outcome;
pub mod payload;
