//! Generic hasher facade over any [`HashProvider`].
//!
//! `Hasher<P>` exposes one surface for every algorithm: `absorb`, then either
//! `digest`/`hexdigest` (fixed-output providers) or `squeeze`/`hexsqueeze`
//! (XOF providers). Parameter setters exist only when the provider implements
//! the matching capability trait, so asking an unsalted algorithm for a salt
//! is a compile error rather than a runtime one.
//!
//! # Example
//!
//! ```
//! use hashes::{Hasher, crypto::{Blake2b, Shake128}};
//!
//! let mut h = Hasher::<Blake2b>::with_size(256)?;
//! h.absorb("The quick brown fox ")?.absorb("jumps over the lazy dog")?;
//! assert_eq!(h.hexdigest(), "01718cec35cd3d796dd00020e0bfecb473ad23457d063b75eff29c0ffa2e58a9");
//!
//! let mut x = Hasher::<Shake128>::new();
//! x.absorb(b"The quick brown fox jumps over the lazy dog")?;
//! assert_eq!(x.hexsqueeze(4), "f4202e3c");
//! # Ok::<(), hashes::HashError>(())
//! ```

use alloc::{string::String, vec, vec::Vec};
use core::fmt;

use traits::{
  ExtendableOutput, FixedOutput, HashError, HashProvider, SetCustomization, SetFunctionName, SetKey,
  SetPersonalization, SetSalt, WithHashSize,
};

use crate::introspect::{AlgorithmInfo, Describe};

fn to_hex(bytes: &[u8]) -> String {
  use fmt::Write as _;
  let mut s = String::with_capacity(bytes.len() * 2);
  for &b in bytes {
    // Writing into a `String` cannot fail.
    let _ = write!(&mut s, "{b:02x}");
  }
  s
}

/// One streaming hash session over provider `P`.
#[derive(Clone)]
pub struct Hasher<P> {
  provider: P,
}

impl<P: HashProvider + Default> Default for Hasher<P> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<P: HashProvider> fmt::Debug for Hasher<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Hasher").field("algorithm", &P::NAME).finish_non_exhaustive()
  }
}

impl<P: HashProvider + Default> Hasher<P> {
  /// Session with the provider's default size and parameters.
  #[must_use]
  pub fn new() -> Self {
    Self::from_provider(P::default())
  }
}

impl<P: WithHashSize> Hasher<P> {
  /// Session producing `bits`-bit digests.
  ///
  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] when the algorithm does not offer `bits`.
  pub fn with_size(bits: usize) -> Result<Self, HashError> {
    Ok(Self::from_provider(P::with_hash_size(bits)?))
  }
}

impl<P: HashProvider> Hasher<P> {
  /// Wrap a configured provider. The session starts fresh.
  #[must_use]
  pub fn from_provider(mut provider: P) -> Self {
    provider.init();
    Self { provider }
  }

  /// Absorb more input.
  ///
  /// # Errors
  ///
  /// [`HashError::MisusedSession`] once an XOF has started squeezing.
  #[inline]
  pub fn absorb(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self, HashError> {
    self.provider.update(data.as_ref())?;
    Ok(self)
  }

  /// Start over. With `reset_parameters`, key material and other parameters
  /// are wiped first and the provider falls back to its unparameterized
  /// form; the output size is kept.
  pub fn reset(&mut self, reset_parameters: bool) -> &mut Self {
    if reset_parameters {
      self.provider.clear();
    }
    self.provider.init();
    self
  }

  #[inline]
  #[must_use]
  pub fn provider(&self) -> &P {
    &self.provider
  }

  #[inline]
  #[must_use]
  pub fn into_provider(self) -> P {
    self.provider
  }

  /// The provider's name.
  #[inline]
  #[must_use]
  pub fn name(&self) -> &'static str {
    P::NAME
  }
}

impl<P: HashProvider + Describe> Hasher<P> {
  /// Static description of the installed algorithm.
  #[inline]
  #[must_use]
  pub fn info(&self) -> &'static AlgorithmInfo {
    P::INFO
  }
}

impl<P: FixedOutput> Hasher<P> {
  /// Digest size in bits.
  #[inline]
  #[must_use]
  pub fn hash_size(&self) -> usize {
    self.provider.hash_size()
  }

  /// Write the digest of everything absorbed so far. The session is left
  /// untouched and can keep absorbing.
  ///
  /// # Errors
  ///
  /// [`HashError::OutputLength`] unless `out` is exactly `hash_size() / 8`
  /// bytes.
  pub fn digest_into(&self, out: &mut [u8]) -> Result<(), HashError> {
    let expected = self.hash_size() / 8;
    if out.len() != expected {
      return Err(HashError::OutputLength {
        expected,
        actual: out.len(),
      });
    }
    self.provider.finalize_into(out);
    Ok(())
  }

  #[must_use]
  pub fn digest(&self) -> Vec<u8> {
    let mut out = vec![0u8; self.hash_size() / 8];
    self.provider.finalize_into(&mut out);
    out
  }

  /// Lowercase hex of [`Hasher::digest`].
  #[must_use]
  pub fn hexdigest(&self) -> String {
    to_hex(&self.digest())
  }
}

impl<P: ExtendableOutput> Hasher<P> {
  /// Fill `out` with the next output bytes. The first call ends absorption.
  #[inline]
  pub fn squeeze_into(&mut self, out: &mut [u8]) {
    self.provider.squeeze(out);
  }

  #[must_use]
  pub fn squeeze(&mut self, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    self.provider.squeeze(&mut out);
    out
  }

  /// Lowercase hex of the next `len` output bytes.
  #[must_use]
  pub fn hexsqueeze(&mut self, len: usize) -> String {
    to_hex(&self.squeeze(len))
  }

  #[inline]
  #[must_use]
  pub fn is_squeezing(&self) -> bool {
    self.provider.is_squeezing()
  }
}

macro_rules! setter {
  ($trait:ident, $method:ident, $arg:ident) => {
    impl<P: HashProvider + $trait> Hasher<P> {
      /// Set the parameter and restart the session; absorbed data is
      /// discarded.
      ///
      /// # Errors
      ///
      /// Whatever the provider reports for an unacceptable value; the
      /// session is unchanged in that case.
      pub fn $method(&mut self, $arg: impl AsRef<[u8]>) -> Result<&mut Self, HashError> {
        self.provider.$method($arg.as_ref())?;
        self.provider.init();
        Ok(self)
      }
    }
  };
}

setter!(SetKey, set_key, key);
setter!(SetSalt, set_salt, salt);
setter!(SetPersonalization, set_personalization, personalization);
setter!(SetCustomization, set_customization, customization);
setter!(SetFunctionName, set_function_name, function_name);
