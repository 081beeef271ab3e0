//! SHA-3 (FIPS 202): the SHA3 fixed-output hashes and the SHAKE XOFs.
//!
//! Portable, `no_std`, pure Rust on top of the shared Keccak sponge.

use traits::{Digest, ExtendableOutput, FixedOutput, HashError, HashProvider, WithHashSize};

use super::keccak::{KeccakSponge, KeccakXof};
use crate::introspect::{AlgorithmInfo, Describe, OutputKind, SizeSet};

const DS_SHA3: u8 = 0x06;
pub(crate) const DS_SHAKE: u8 = 0x1F;

macro_rules! sha3_fixed {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $out:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone, Default)]
    pub struct $name {
      sponge: KeccakSponge<$rate>,
    }

    impl $name {
      #[inline]
      fn wipe(&mut self) {
        self.sponge.clear();
      }
    }

    impl Digest for $name {
      const OUTPUT_SIZE: usize = $out;
      type Output = [u8; $out];

      #[inline]
      fn new() -> Self {
        Self::default()
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.sponge.update(data);
      }

      #[inline]
      fn finalize(&self) -> Self::Output {
        let mut out = [0u8; $out];
        self.sponge.clone().squeeze(DS_SHA3, &mut out);
        out
      }

      #[inline]
      fn reset(&mut self) {
        self.sponge.reset();
      }
    }

    impl_digest_provider!($name, $label);

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Fixed,
        sizes: SizeSet::Fixed($out * 8),
        default_size: $out * 8,
        block_len: $rate,
        parameters: &[],
      };
    }
  };
}

sha3_fixed!(
  /// SHA3-224.
  Sha3_224, 144, 28, "SHA3-224"
);
sha3_fixed!(
  /// SHA3-256.
  Sha3_256, 136, 32, "SHA3-256"
);
sha3_fixed!(
  /// SHA3-384.
  Sha3_384, 104, 48, "SHA3-384"
);
sha3_fixed!(
  /// SHA3-512.
  Sha3_512, 72, 64, "SHA3-512"
);

#[derive(Clone)]
enum Sha3Variant {
  S224(Sha3_224),
  S256(Sha3_256),
  S384(Sha3_384),
  S512(Sha3_512),
}

macro_rules! dispatch {
  ($self:expr, $h:ident => $body:expr) => {
    match $self {
      Sha3Variant::S224($h) => $body,
      Sha3Variant::S256($h) => $body,
      Sha3Variant::S384($h) => $body,
      Sha3Variant::S512($h) => $body,
    }
  };
}

/// SHA-3 with the output size chosen at runtime: 224, 256, 384 or 512 bits.
///
/// Each size is its own rate, so this dispatches to the sized types.
///
/// # Example
///
/// ```
/// use hashes::crypto::Sha3;
/// use traits::{FixedOutput as _, HashProvider as _};
///
/// let mut h = Sha3::new(384)?;
/// h.update(b"abc")?;
/// let mut out = [0u8; 48];
/// h.finalize_into(&mut out);
/// assert!(Sha3::new(320).is_err());
/// # Ok::<(), traits::HashError>(())
/// ```
#[derive(Clone)]
pub struct Sha3 {
  inner: Sha3Variant,
}

const SHA3_SIZES: SizeSet = SizeSet::OneOf(&[224, 256, 384, 512]);

impl Sha3 {
  /// SHA-3 producing `bits`-bit digests.
  ///
  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] unless `bits` is 224, 256, 384 or 512.
  pub fn new(bits: usize) -> Result<Self, HashError> {
    let inner = match SHA3_SIZES.validate(bits)? {
      224 => Sha3Variant::S224(Sha3_224::default()),
      256 => Sha3Variant::S256(Sha3_256::default()),
      384 => Sha3Variant::S384(Sha3_384::default()),
      _ => Sha3Variant::S512(Sha3_512::default()),
    };
    Ok(Self { inner })
  }
}

impl Default for Sha3 {
  #[inline]
  fn default() -> Self {
    Self {
      inner: Sha3Variant::S256(Sha3_256::default()),
    }
  }
}

impl HashProvider for Sha3 {
  const NAME: &'static str = "SHA3";

  #[inline]
  fn init(&mut self) {
    dispatch!(&mut self.inner, h => h.reset());
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    dispatch!(&mut self.inner, h => Digest::update(h, data));
    Ok(())
  }

  #[inline]
  fn clear(&mut self) {
    dispatch!(&mut self.inner, h => h.wipe());
  }
}

impl FixedOutput for Sha3 {
  #[inline]
  fn hash_size(&self) -> usize {
    dispatch!(&self.inner, h => h.hash_size())
  }

  #[inline]
  fn finalize_into(&self, out: &mut [u8]) {
    dispatch!(&self.inner, h => h.finalize_into(out));
  }
}

impl WithHashSize for Sha3 {
  #[inline]
  fn with_hash_size(bits: usize) -> Result<Self, HashError> {
    Self::new(bits)
  }
}

impl Describe for Sha3 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "SHA3",
    output: OutputKind::Fixed,
    sizes: SHA3_SIZES,
    default_size: 256,
    block_len: 136,
    parameters: &[],
  };
}

macro_rules! shake {
  ($(#[$meta:meta])* $name:ident, $reader:ident, $rate:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone, Default)]
    pub struct $name {
      sponge: KeccakSponge<$rate>,
    }

    #[doc = concat!("Output reader for [`", stringify!($name), "`].")]
    pub type $reader = KeccakXof<$rate>;

    impl $name {
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self::default()
      }

      /// Reader over the output of everything absorbed so far. `self` is
      /// left absorbing.
      #[inline]
      #[must_use]
      pub fn finalize_xof(&self) -> $reader {
        KeccakXof::new(self.sponge.clone(), DS_SHAKE)
      }

      /// One-shot: fill `out` with the XOF output of `data`.
      #[inline]
      pub fn hash_into(data: &[u8], out: &mut [u8]) {
        let mut h = Self::new();
        h.sponge.update(data);
        h.sponge.squeeze(DS_SHAKE, out);
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        self.sponge.reset();
      }

      #[inline]
      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.sponge.absorb(data)
      }

      #[inline]
      fn clear(&mut self) {
        self.sponge.clear();
      }
    }

    impl ExtendableOutput for $name {
      #[inline]
      fn squeeze(&mut self, out: &mut [u8]) {
        self.sponge.squeeze(DS_SHAKE, out);
      }

      #[inline]
      fn is_squeezing(&self) -> bool {
        self.sponge.is_squeezing()
      }
    }

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Extendable,
        sizes: SizeSet::Unbounded,
        default_size: 0,
        block_len: $rate,
        parameters: &[],
      };
    }
  };
}

shake!(
  /// SHAKE128 extendable-output function.
  Shake128, Shake128Xof, 168, "SHAKE128"
);
shake!(
  /// SHAKE256 extendable-output function.
  Shake256, Shake256Xof, 136, "SHAKE256"
);

#[cfg(test)]
mod tests {
  use traits::{Digest, ExtendableOutput, FixedOutput, HashError, HashProvider, Xof};

  use super::*;

  fn hex(bytes: &[u8]) -> alloc::string::String {
    use alloc::string::String;
    use core::fmt::Write;
    let mut s = String::new();
    for &b in bytes {
      write!(&mut s, "{:02x}", b).unwrap();
    }
    s
  }

  extern crate alloc;

  const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

  #[test]
  fn sha3_256_vectors() {
    assert_eq!(
      hex(&Sha3_256::digest(b"")),
      "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
    );
    assert_eq!(
      hex(&Sha3_256::digest(b"abc")),
      "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
    assert_eq!(
      hex(&Sha3_256::digest(FOX)),
      "69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04"
    );
  }

  #[test]
  fn sha3_224_384_empty() {
    assert_eq!(
      hex(&Sha3_224::digest(b"")),
      "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7"
    );
    assert_eq!(
      hex(&Sha3_384::digest(b"")),
      "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004"
    );
  }

  #[test]
  fn sha3_512_vectors() {
    assert_eq!(
      hex(&Sha3_512::digest(b"")),
      "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
    );
    assert_eq!(
      hex(&Sha3_512::digest(FOX)),
      "01dedd5de4ef14642445ba5f5b97c15e47b9ad931326e4b0727cd94cefc44fff23f07bf543139939b49128caf436dc1bdee54fcb24023a08d9403f9b4bf0d450"
    );
  }

  #[test]
  fn runtime_sha3_matches_sized() {
    for (bits, expected) in [
      (224usize, Sha3_224::digest(FOX).to_vec()),
      (256, Sha3_256::digest(FOX).to_vec()),
      (384, Sha3_384::digest(FOX).to_vec()),
      (512, Sha3_512::digest(FOX).to_vec()),
    ] {
      let mut h = Sha3::new(bits).unwrap();
      HashProvider::update(&mut h, FOX).unwrap();
      assert_eq!(h.hash_size(), bits);
      let mut out = alloc::vec![0u8; bits / 8];
      h.finalize_into(&mut out);
      assert_eq!(out, expected);
    }
  }

  #[test]
  fn runtime_sha3_rejects_sizes() {
    for bits in [0usize, 8, 200, 255, 320, 1024] {
      assert_eq!(Sha3::new(bits).err(), Some(HashError::UnsupportedSize { bits }));
    }
  }

  #[test]
  fn shake_vectors() {
    let mut out = [0u8; 32];
    Shake128::hash_into(b"", &mut out);
    assert_eq!(hex(&out), "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26");
    Shake128::hash_into(FOX, &mut out);
    assert_eq!(hex(&out), "f4202e3c5852f9182a0430fd8144f0a74b95e7417ecae17db0f8cfeed0e3e66e");

    let mut out = [0u8; 64];
    Shake256::hash_into(b"", &mut out);
    assert_eq!(
      hex(&out),
      "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762fd75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be"
    );
  }

  #[test]
  fn finalize_xof_leaves_provider_absorbing() {
    let mut h = Shake128::new();
    h.update(b"The quick brown fox ").unwrap();
    let mut early = h.finalize_xof();
    h.update(b"jumps over the lazy dog").unwrap();
    assert!(!h.is_squeezing());

    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    h.squeeze(&mut a);
    early.squeeze(&mut b);
    assert_eq!(hex(&a), "f4202e3c5852f9182a0430fd8144f0a74b95e7417ecae17db0f8cfeed0e3e66e");
    assert_ne!(a, b);
    assert_eq!(h.update(b"more"), Err(HashError::MisusedSession));
  }

  #[test]
  fn clear_then_init_restores_session() {
    let mut h = Shake256::new();
    h.update(b"secret").unwrap();
    h.clear();
    assert!(h.sponge.is_zeroed());
    h.init();
    h.update(FOX).unwrap();
    let mut got = [0u8; 64];
    h.squeeze(&mut got);
    let mut expected = [0u8; 64];
    Shake256::hash_into(FOX, &mut expected);
    assert_eq!(got, expected);
  }
}
