//! SpookyHash V2 - a 128-bit non-cryptographic hash function by Bob Jenkins.
//!
//! This is a from-scratch Rust port of SpookyV2, matching its mixing
//! constants, rotation schedule and tail-byte handling bit for bit so the
//! one-shot and streaming entry points agree with each other and with any
//! other conforming implementation.
//!
//! # Example
//!
//! ```
//! use spooky_hash::{hash128, SpookyHasher};
//!
//! // One-shot hashing.
//! let (h1, h2) = hash128(b"hello world", 0, 0);
//!
//! // Incremental hashing of the same logical message.
//! let mut hasher = SpookyHasher::new(0, 0);
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize128(), (h1, h2));
//! ```
//!
//! Non-goals: cryptographic strength, collision resistance against
//! adversarial input, and output stable across endianness or architecture
//! word size beyond what is documented here. All lane reads are
//! little-endian regardless of host byte order.

#![cfg_attr(not(test), no_std)]

mod hasher;
mod mixing;
mod oneshot;

pub use hasher::{HasherState, SpookyBuildHasher, SpookyHasher};
pub use mixing::{BLOCK_SIZE, BUF_SIZE, NUM_VARS, SC_CONST};
pub use oneshot::{hash128, hash128_opt, hash32, hash64, DEFAULT_SEED};
