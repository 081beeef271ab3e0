//! Streaming provider contract.
//!
//! Every algorithm in the workspace is a [`HashProvider`]: a self-contained
//! session owning its state, buffer and counters. On top of that it is either
//! a [`FixedOutput`] (one digest) or an [`ExtendableOutput`] (incremental
//! squeeze). The generic facade in `hashes` is written purely against these
//! traits.
//!
//! # Lifecycle
//!
//! ```text
//! construct (initialised) -> update* -> finalize_into | squeeze+
//!        ^                                                  |
//!        +------------------- init() ----------------------+
//! clear() -> all state zero, parameters forgotten -> init() required
//! ```

use crate::HashError;

/// A streaming hash session.
pub trait HashProvider: Clone {
  /// Stable algorithm name, e.g. `"SHA3"` or `"KT128"`.
  const NAME: &'static str;

  /// Re-establish the algorithm's initial state from the configured size and
  /// parameters. Any absorbed data is discarded.
  fn init(&mut self);

  /// Absorb more input.
  ///
  /// # Errors
  ///
  /// [`HashError::MisusedSession`] once an extendable-output session has
  /// started squeezing.
  fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

  /// Zero all internal state, buffered input and secret parameters.
  ///
  /// The session is unusable until the next [`init`](Self::init). The
  /// configured output size survives.
  fn clear(&mut self);
}

/// A provider producing one digest of a configured size.
pub trait FixedOutput: HashProvider {
  /// Configured output size in bits.
  fn hash_size(&self) -> usize;

  /// Write the digest of everything absorbed so far.
  ///
  /// The session is left untouched, so absorbing may continue afterwards.
  /// `out` must be exactly `hash_size() / 8` bytes long; callers are expected
  /// to check this (the facade does).
  fn finalize_into(&self, out: &mut [u8]);
}

/// A provider whose output can be squeezed incrementally to any length.
pub trait ExtendableOutput: HashProvider {
  /// Emit the next `out.len()` output bytes.
  ///
  /// The first call pads and finalizes the absorbed input; later calls
  /// continue the same stream. Output is independent of how the total length
  /// is split across calls.
  fn squeeze(&mut self, out: &mut [u8]);

  /// Whether the session has entered the squeezing phase.
  fn is_squeezing(&self) -> bool;
}

/// A fixed-output provider whose size is chosen at runtime.
pub trait WithHashSize: FixedOutput + Sized {
  /// Construct an initialised session producing `bits`-bit digests.
  ///
  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] if `bits` is not in the algorithm's
  /// supported set or is not a multiple of 8.
  fn with_hash_size(bits: usize) -> Result<Self, HashError>;
}
