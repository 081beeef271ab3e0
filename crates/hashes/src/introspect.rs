//! Algorithm descriptors.
//!
//! Every provider carries a static [`AlgorithmInfo`] describing its output
//! kind, accepted sizes, block length and optional parameters. The size sets
//! here are the single source of truth for runtime size validation.
//!
//! # Example
//!
//! ```
//! use hashes::introspect::{self, OutputKind};
//!
//! let info = introspect::find("BLAKE2b").unwrap();
//! assert_eq!(info.output, OutputKind::Fixed);
//! assert!(info.sizes.validate(256).is_ok());
//! assert!(info.sizes.validate(300).is_err());
//! ```

use core::fmt;

use traits::HashError;

use crate::crypto::{
  AsconCxof128, AsconHash256, AsconXof128, Blake2b, Blake2b512, Blake2bp, Blake2s, Blake2s256, Blake2sp, CShake128,
  CShake256, Kmac128, Kmac256, KmacXof128, KmacXof256, Kt128, Kt256, M14, Sha3, Sha3_224, Sha3_256, Sha3_384,
  Sha3_512, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256, Shake128, Shake256, TurboShake128, TurboShake256,
};

/// Whether an algorithm produces one digest or a squeezable stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
  /// One digest of `hash_size()` bits.
  Fixed,
  /// Arbitrary-length output via repeated squeezing.
  Extendable,
}

/// Output sizes (in bits) an algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSet {
  /// Exactly one size.
  Fixed(usize),
  /// One of a short list.
  OneOf(&'static [usize]),
  /// `min..=max` in steps of `step`.
  Range {
    /// Smallest size.
    min: usize,
    /// Largest size.
    max: usize,
    /// Granularity.
    step: usize,
  },
  /// No fixed size: the caller squeezes as much as it wants.
  Unbounded,
}

impl SizeSet {
  /// Whether `bits` is an accepted whole-byte size.
  #[must_use]
  pub const fn contains(&self, bits: usize) -> bool {
    if bits % 8 != 0 {
      return false;
    }
    match *self {
      Self::Fixed(n) => bits == n,
      Self::OneOf(mut list) => {
        while let [first, rest @ ..] = list {
          if *first == bits {
            return true;
          }
          list = rest;
        }
        false
      }
      Self::Range { min, max, step } => bits >= min && bits <= max && (bits - min) % step == 0,
      Self::Unbounded => bits > 0,
    }
  }

  /// Validate a requested size.
  ///
  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] when `bits` is not accepted.
  #[inline]
  pub const fn validate(&self, bits: usize) -> Result<usize, HashError> {
    if self.contains(bits) {
      Ok(bits)
    } else {
      Err(HashError::UnsupportedSize { bits })
    }
  }
}

impl fmt::Display for SizeSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Fixed(n) => write!(f, "{n}"),
      Self::OneOf(list) => {
        for (i, n) in list.iter().enumerate() {
          if i != 0 {
            f.write_str("/")?;
          }
          write!(f, "{n}")?;
        }
        Ok(())
      }
      Self::Range { min, max, step } => write!(f, "{min}..={max} step {step}"),
      Self::Unbounded => f.write_str("any"),
    }
  }
}

/// Optional parameter an algorithm accepts, with its length rule in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
  /// Secret key of at most `max_len` bytes (`None`: any length).
  Key {
    /// Upper bound, if any.
    max_len: Option<usize>,
  },
  /// Salt of exactly `len` bytes.
  Salt {
    /// Required length.
    len: usize,
  },
  /// Personalization of exactly `len` bytes.
  Personalization {
    /// Required length.
    len: usize,
  },
  /// Customization string of at most `max_len` bytes (`None`: any length).
  Customization {
    /// Upper bound, if any.
    max_len: Option<usize>,
  },
  /// cSHAKE function-name string.
  FunctionName,
  /// TurboSHAKE domain-separation byte in `0x01..=0x7F`.
  Domain,
}

impl Parameter {
  /// Check a supplied length against this parameter's rule.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] when the length is not accepted.
  pub const fn check_len(&self, len: usize) -> Result<(), HashError> {
    let ok = match *self {
      Self::Key { max_len: Some(max) } | Self::Customization { max_len: Some(max) } => len <= max,
      Self::Salt { len: want } | Self::Personalization { len: want } => len == want,
      Self::Key { max_len: None } | Self::Customization { max_len: None } | Self::FunctionName | Self::Domain => true,
    };
    if ok {
      Ok(())
    } else {
      Err(HashError::InvalidParameterLength {
        parameter: self.name(),
        len,
      })
    }
  }

  /// Short lowercase name used in error messages.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self {
      Self::Key { .. } => "key",
      Self::Salt { .. } => "salt",
      Self::Personalization { .. } => "personalization",
      Self::Customization { .. } => "customization",
      Self::FunctionName => "function name",
      Self::Domain => "domain",
    }
  }
}

/// Static description of one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
  /// Provider name, equal to `HashProvider::NAME`.
  pub name: &'static str,
  /// Fixed digest or XOF.
  pub output: OutputKind,
  /// Accepted output sizes in bits.
  pub sizes: SizeSet,
  /// Size used by `Default`, in bits (0 for XOFs).
  pub default_size: usize,
  /// Bytes consumed per transform call (the rate, for sponges).
  pub block_len: usize,
  /// Optional parameters.
  pub parameters: &'static [Parameter],
}

impl fmt::Display for AlgorithmInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = match self.output {
      OutputKind::Fixed => "fixed",
      OutputKind::Extendable => "xof",
    };
    write!(f, "{} ({kind}, sizes {}, block {})", self.name, self.sizes, self.block_len)
  }
}

/// Implemented by every provider: where to find its descriptor.
pub trait Describe {
  /// This provider's descriptor.
  const INFO: &'static AlgorithmInfo;
}

/// Every algorithm in the crate.
pub const ALGORITHMS: &[&AlgorithmInfo] = &[
  Sha3::INFO,
  Sha3_224::INFO,
  Sha3_256::INFO,
  Sha3_384::INFO,
  Sha3_512::INFO,
  Shake128::INFO,
  Shake256::INFO,
  CShake128::INFO,
  CShake256::INFO,
  Kmac128::INFO,
  Kmac256::INFO,
  KmacXof128::INFO,
  KmacXof256::INFO,
  TurboShake128::INFO,
  TurboShake256::INFO,
  Kt128::INFO,
  Kt256::INFO,
  M14::INFO,
  AsconHash256::INFO,
  AsconXof128::INFO,
  AsconCxof128::INFO,
  Sha224::INFO,
  Sha256::INFO,
  Sha384::INFO,
  Sha512::INFO,
  Sha512_224::INFO,
  Sha512_256::INFO,
  Blake2b::INFO,
  Blake2b512::INFO,
  Blake2s::INFO,
  Blake2s256::INFO,
  Blake2bp::INFO,
  Blake2sp::INFO,
];

/// Look up a descriptor by provider name (ASCII case-insensitive).
#[must_use]
pub fn find(name: &str) -> Option<&'static AlgorithmInfo> {
  ALGORITHMS.iter().copied().find(|info| info.name.eq_ignore_ascii_case(name))
}
