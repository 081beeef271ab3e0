//! Error types for hashing sessions.
//!
//! [`HashError`] covers caller-input errors (raised at construction or when a
//! parameter is set, never mid-stream) and session misuse. [`VerificationError`]
//! is the opaque MAC verification failure.

use core::fmt;

/// Verification failed.
///
/// Returned when cryptographic verification fails (MAC tags, AEAD tags,
/// signatures). Intentionally opaque to prevent timing side-channels.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn verify(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   // Real code: use constant-time comparison
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// let a = [0u8; 32];
/// let b = [1u8; 32];
/// assert!(verify(&a, &b).is_err());
/// ```
///
/// # Security
///
/// This error provides no details about the failure to prevent timing
/// side-channels. The underlying verification should use constant-time
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  ///
  /// This is the only way to construct this error from outside the crate,
  /// ensuring forward compatibility if fields are added in the future.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}

/// Error raised by a hashing session or one of its parameter setters.
///
/// No variant leaves a session half-updated: the failing call returns before
/// any state is mutated.
///
/// # Examples
///
/// ```
/// use traits::HashError;
///
/// let err = HashError::UnsupportedSize { bits: 300 };
/// assert_eq!(err.to_string(), "unsupported output size: 300 bits");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashError {
  /// Requested output size is outside the supported set or not a multiple of 8.
  UnsupportedSize {
    /// Requested size in bits.
    bits: usize,
  },
  /// A length-constrained parameter was given the wrong length.
  InvalidParameterLength {
    /// Parameter name, e.g. `"salt"`.
    parameter: &'static str,
    /// Length supplied, in bytes.
    len: usize,
  },
  /// A parameter value is outside its domain.
  InvalidParameter {
    /// Parameter name, e.g. `"domain"`.
    parameter: &'static str,
  },
  /// Output buffer length does not match the configured digest length.
  OutputLength {
    /// Required length in bytes.
    expected: usize,
    /// Supplied length in bytes.
    actual: usize,
  },
  /// Input was absorbed after the session started squeezing.
  MisusedSession,
}

impl fmt::Display for HashError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedSize { bits } => write!(f, "unsupported output size: {bits} bits"),
      Self::InvalidParameterLength { parameter, len } => write!(f, "invalid {parameter} length: {len} bytes"),
      Self::InvalidParameter { parameter } => write!(f, "invalid {parameter}"),
      Self::OutputLength { expected, actual } => {
        write!(f, "output buffer is {actual} bytes, digest is {expected} bytes")
      }
      Self::MisusedSession => f.write_str("absorb called after squeezing started"),
    }
  }
}

impl core::error::Error for HashError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn verification_display_message() {
    assert_eq!(VerificationError::new().to_string(), "verification failed");
    assert_eq!(format!("{:?}", VerificationError::new()), "VerificationError");
  }

  #[test]
  fn verification_default_impl() {
    let err: VerificationError = Default::default();
    assert_eq!(err, VerificationError::new());
    assert_eq!(core::mem::size_of::<VerificationError>(), 0);
  }

  #[test]
  fn hash_error_messages() {
    assert_eq!(
      HashError::UnsupportedSize { bits: 300 }.to_string(),
      "unsupported output size: 300 bits"
    );
    assert_eq!(
      HashError::InvalidParameterLength { parameter: "salt", len: 3 }.to_string(),
      "invalid salt length: 3 bytes"
    );
    assert_eq!(HashError::InvalidParameter { parameter: "domain" }.to_string(), "invalid domain");
    assert_eq!(
      HashError::OutputLength { expected: 32, actual: 31 }.to_string(),
      "output buffer is 31 bytes, digest is 32 bytes"
    );
    assert_eq!(HashError::MisusedSession.to_string(), "absorb called after squeezing started");
  }

  #[test]
  fn hash_error_is_error() {
    use core::error::Error;

    let err = HashError::MisusedSession;
    assert!(err.source().is_none());
  }

  #[test]
  fn trait_bounds() {
    fn assert_send_sync<T: Send + Sync + Unpin>() {}

    assert_send_sync::<VerificationError>();
    assert_send_sync::<HashError>();
  }
}
