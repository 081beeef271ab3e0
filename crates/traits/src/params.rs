//! Optional capability traits for parameterised constructions.
//!
//! A provider implements only the setters its construction supports. Every
//! setter re-derives the initial state and re-initialises the session, so data
//! absorbed before the call is discarded.

use crate::HashError;

/// Secret key (BLAKE2 keyed mode, KMAC).
pub trait SetKey {
  /// Install `key` and re-initialise.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] if the key is too long.
  fn set_key(&mut self, key: &[u8]) -> Result<(), HashError>;
}

/// Salt (BLAKE2 parameter block).
pub trait SetSalt {
  /// Install `salt` and re-initialise.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] if the salt is not the exact
  /// required length.
  fn set_salt(&mut self, salt: &[u8]) -> Result<(), HashError>;
}

/// Personalization string (BLAKE2 parameter block).
pub trait SetPersonalization {
  /// Install `personalization` and re-initialise.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] if the value is not the exact
  /// required length.
  fn set_personalization(&mut self, personalization: &[u8]) -> Result<(), HashError>;
}

/// Customization string (cSHAKE, KMAC, KangarooTwelve, Ascon-CXOF).
pub trait SetCustomization {
  /// Install `customization` and re-initialise.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] if the algorithm bounds the length
  /// and the value exceeds it.
  fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError>;
}

/// Function-name string (cSHAKE).
pub trait SetFunctionName {
  /// Install `function_name` and re-initialise.
  ///
  /// # Errors
  ///
  /// Reserved for algorithms that restrict the value; cSHAKE accepts any.
  fn set_function_name(&mut self, function_name: &[u8]) -> Result<(), HashError>;
}
