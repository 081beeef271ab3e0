//! Core hashing contracts for hashkit.
//!
//! This crate provides the traits every hash family in the workspace conforms
//! to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`HashProvider`] | Streaming session: `init`, `update`, `clear` | every algorithm |
//! | [`FixedOutput`] | Single digest of `hash_size()` bits | SHA-3, SHA-2, BLAKE2, KMAC |
//! | [`ExtendableOutput`] | Incremental squeeze of any length | SHAKE, cSHAKE, KT128, Ascon-XOF |
//! | [`WithHashSize`] | Runtime-checked output size | `Sha3`, `Blake2b`, `Sha512` |
//! | [`SetKey`], [`SetSalt`], [`SetPersonalization`], [`SetCustomization`], [`SetFunctionName`] | Algorithm-specific parameters | BLAKE2, KMAC, cSHAKE, Ascon-CXOF |
//! | [`Digest`] | Compile-time sized one-shot and streaming digest | `Sha3_256`, `Sha256` |
//! | [`Xof`] | Reader over an already finalized XOF | `Shake128Xof` |
//!
//! # Error Types
//!
//! - [`HashError`] - Caller-input and session misuse errors
//! - [`VerificationError`] - Opaque error for MAC tag verification
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod params;
mod provider;
mod xof;

pub use digest::Digest;
pub use error::{HashError, VerificationError};
pub use params::{SetCustomization, SetFunctionName, SetKey, SetPersonalization, SetSalt};
pub use provider::{ExtendableOutput, FixedOutput, HashProvider, WithHashSize};
pub use xof::Xof;
