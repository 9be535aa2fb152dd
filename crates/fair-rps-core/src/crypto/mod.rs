//! Cryptographic primitives for the fairness proof.
//!
//! This module provides:
//! - CommitmentKey, the per-round secret revealed after the player moves
//! - CommitmentTag, the HMAC-SHA256 tag shown before the player moves

mod commitment;

pub use commitment::{CommitmentKey, CommitmentTag, KEY_LEN, TAG_LEN};
