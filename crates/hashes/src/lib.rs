//! Portable streaming hash functions and XOFs behind one provider contract.
//!
//! Every algorithm is a [`traits::HashProvider`] session that absorbs input in
//! arbitrary pieces and produces the same result as a one-shot call.
//! [`Hasher`] wraps any provider with a uniform `absorb`/`digest`/`squeeze`
//! surface and exposes only the parameter setters the provider supports.
//!
//! This crate is `no_std` compatible (it needs `alloc`). The `std` feature
//! adds scoped-thread leaf lanes for BLAKE2bp/BLAKE2sp and environment
//! overrides for their tuning (see [`config`]).
//!
//! # Modules
//!
//! - [`crypto`] - The algorithms: Keccak family, Ascon, SHA-2, BLAKE2.
//! - [`hasher`] - The generic [`Hasher`] facade.
//! - [`introspect`] - Static descriptors for every algorithm.
//! - [`config`] - BLAKE2bp/BLAKE2sp execution tuning.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod absorb;
pub mod config;
pub mod crypto;
pub mod hasher;
pub mod introspect;

pub use hasher::Hasher;
pub use introspect::{AlgorithmInfo, Describe};
pub use traits::{
  Digest, ExtendableOutput, FixedOutput, HashError, HashProvider, SetCustomization, SetFunctionName, SetKey,
  SetPersonalization, SetSalt, WithHashSize, Xof,
};
