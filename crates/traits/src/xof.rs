//! Extendable-output reader trait.

/// Reader over a finalized extendable-output function.
///
/// Obtained from a provider's `finalize_xof`, which leaves the provider itself
/// untouched. Successive calls continue the same output stream.
///
/// This trait intentionally has no `std::io::Read` dependency; it is usable in
/// `no_std` environments.
pub trait Xof: Clone {
  /// Squeeze output bytes into `out`.
  fn squeeze(&mut self, out: &mut [u8]);
}
