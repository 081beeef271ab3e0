//! Cryptographic hash functions and XOFs.
//!
//! Sponge family (Keccak and Ascon permutations) plus the SHA-2 and BLAKE2
//! compression families. Every type here is a `traits::HashProvider`.

/// Provider traits for a compile-time sized `Digest` type that offers an
/// inherent `wipe(&mut self)`.
macro_rules! impl_digest_provider {
  ($ty:ty, $name:literal) => {
    impl traits::HashProvider for $ty {
      const NAME: &'static str = $name;

      #[inline]
      fn init(&mut self) {
        traits::Digest::reset(self);
      }

      #[inline]
      fn update(&mut self, data: &[u8]) -> Result<(), traits::HashError> {
        traits::Digest::update(self, data);
        Ok(())
      }

      #[inline]
      fn clear(&mut self) {
        self.wipe();
      }
    }

    impl traits::FixedOutput for $ty {
      #[inline]
      fn hash_size(&self) -> usize {
        <Self as traits::Digest>::OUTPUT_SIZE * 8
      }

      #[inline]
      fn finalize_into(&self, out: &mut [u8]) {
        let digest = traits::Digest::finalize(self);
        for (dst, src) in out.iter_mut().zip(digest.as_ref()) {
          *dst = *src;
        }
      }
    }
  };
}

pub mod ascon;
pub mod blake2b;
pub mod blake2p;
pub mod blake2s;
pub mod kangaroo;
mod keccak;
pub mod sha256;
pub mod sha3;
pub mod sha3_derived;
pub mod sha512;

pub use ascon::{AsconCxof128, AsconHash256, AsconXof128, AsconXof128Xof};
pub use blake2b::{Blake2b, Blake2b512};
pub use blake2p::{Blake2bp, Blake2sp};
pub use blake2s::{Blake2s, Blake2s256};
pub use kangaroo::{K12, Kt128, Kt256, M14, TurboShake128, TurboShake256};
pub use keccak::KeccakXof;
pub use sha3::{Sha3, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Shake128, Shake128Xof, Shake256, Shake256Xof};
pub use sha3_derived::{CShake128, CShake256, Kmac128, Kmac256, KmacXof128, KmacXof256};
pub use sha256::{Sha224, Sha256};
pub use sha512::{Sha384, Sha512, Sha512_224, Sha512_256};
