//! SP800-185 derived Keccak primitives: cSHAKE and KMAC.
//!
//! These are built on top of the internal Keccak sponge and are usable in
//! `no_std` environments. The encoded prefix (function name, customization,
//! key) is absorbed once into a cached initial sponge whenever a parameter
//! changes; `init` just restores that cache.

#![allow(clippy::indexing_slicing)] // Fixed-size encoding buffers + audited indexing

use alloc::vec::Vec;

use traits::{
  ExtendableOutput, FixedOutput, HashError, HashProvider, SetCustomization, SetFunctionName, SetKey,
  VerificationError, WithHashSize,
};
use zeroize::{Zeroize, Zeroizing};

use super::{
  keccak::{KeccakSponge, KeccakXof},
  sha3::DS_SHAKE,
};
use crate::introspect::{AlgorithmInfo, Describe, OutputKind, Parameter, SizeSet};

const DS_CSHAKE: u8 = 0x04;

#[inline(always)]
pub(crate) fn left_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
  b[1..].copy_from_slice(&val.to_be_bytes());
  let i = b[1..8].iter().take_while(|&&a| a == 0).count();
  b[i] = (8 - i) as u8;
  &b[i..]
}

#[inline(always)]
pub(crate) fn right_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
  b[..8].copy_from_slice(&val.to_be_bytes());
  let i = b[..7].iter().take_while(|&&a| a == 0).count();
  b[8] = (8 - i) as u8;
  &b[i..=8]
}

#[inline(always)]
fn absorb_encode_string<const RATE: usize>(sponge: &mut KeccakSponge<RATE>, data: &[u8]) {
  let mut b = [0u8; 9];
  sponge.update(left_encode((data.len() as u64) * 8, &mut b));
  sponge.update(data);
}

/// `bytepad(encode_string(N) || encode_string(S), rate)` into a fresh sponge.
///
/// Returns the suffix to finish with: cSHAKE with both strings empty is
/// plain SHAKE.
fn absorb_cshake_prefix<const RATE: usize>(
  sponge: &mut KeccakSponge<RATE>,
  function_name: &[u8],
  customization: &[u8],
) -> u8 {
  if function_name.is_empty() && customization.is_empty() {
    return DS_SHAKE;
  }

  let mut b = [0u8; 9];
  sponge.update(left_encode(RATE as u64, &mut b));
  absorb_encode_string(sponge, function_name);
  absorb_encode_string(sponge, customization);
  sponge.pad_zeroes();
  DS_CSHAKE
}

/// Live sponge plus the cached post-prefix state `init` returns to.
///
/// `stale` marks a cache that must be rebuilt from the parameters first
/// (fresh, or wiped by `clear`).
#[derive(Clone)]
struct Prefixed<const RATE: usize> {
  initial: KeccakSponge<RATE>,
  live: KeccakSponge<RATE>,
  stale: bool,
}

impl<const RATE: usize> Default for Prefixed<RATE> {
  #[inline]
  fn default() -> Self {
    Self {
      initial: KeccakSponge::default(),
      live: KeccakSponge::default(),
      stale: true,
    }
  }
}

impl<const RATE: usize> Prefixed<RATE> {
  fn rebase(&mut self, absorb_prefix: impl FnOnce(&mut KeccakSponge<RATE>)) {
    self.initial.reset();
    absorb_prefix(&mut self.initial);
    self.stale = false;
    self.restart();
  }

  #[inline]
  fn restart(&mut self) {
    self.live = self.initial.clone();
  }

  #[inline]
  fn clear(&mut self) {
    self.initial.clear();
    self.live.clear();
    self.stale = true;
  }
}

macro_rules! cshake {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      session: Prefixed<$rate>,
      function_name: Vec<u8>,
      customization: Vec<u8>,
      suffix: u8,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self {
          session: Prefixed::default(),
          function_name: Vec::new(),
          customization: Vec::new(),
          suffix: DS_SHAKE,
        }
      }
    }

    impl $name {
      #[inline]
      #[must_use]
      pub fn new(customization: &[u8]) -> Self {
        Self::new_with_function_name(&[], customization)
      }

      #[must_use]
      pub fn new_with_function_name(function_name: &[u8], customization: &[u8]) -> Self {
        let mut h = Self {
          function_name: function_name.to_vec(),
          customization: customization.to_vec(),
          ..Self::default()
        };
        h.derive();
        h
      }

      fn derive(&mut self) {
        let (n, s) = (&self.function_name, &self.customization);
        let mut suffix = DS_SHAKE;
        self.session.rebase(|sponge| suffix = absorb_cshake_prefix(sponge, n, s));
        self.suffix = suffix;
      }

      /// Reader over the output of everything absorbed so far. `self` is
      /// left absorbing.
      #[inline]
      #[must_use]
      pub fn finalize_xof(&self) -> KeccakXof<$rate> {
        KeccakXof::new(self.session.live.clone(), self.suffix)
      }

      #[inline]
      pub fn hash_into(function_name: &[u8], customization: &[u8], data: &[u8], out: &mut [u8]) {
        let mut h = Self::new_with_function_name(function_name, customization);
        h.session.live.update(data);
        h.session.live.squeeze(h.suffix, out);
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        if self.session.stale {
          self.derive();
        } else {
          self.session.restart();
        }
      }

      #[inline]
      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.session.live.absorb(data)
      }

      fn clear(&mut self) {
        self.session.clear();
        self.function_name.zeroize();
        self.customization.zeroize();
      }
    }

    impl ExtendableOutput for $name {
      #[inline]
      fn squeeze(&mut self, out: &mut [u8]) {
        self.session.live.squeeze(self.suffix, out);
      }

      #[inline]
      fn is_squeezing(&self) -> bool {
        self.session.live.is_squeezing()
      }
    }

    impl SetCustomization for $name {
      fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError> {
        self.customization.zeroize();
        self.customization.extend_from_slice(customization);
        self.derive();
        Ok(())
      }
    }

    impl SetFunctionName for $name {
      fn set_function_name(&mut self, function_name: &[u8]) -> Result<(), HashError> {
        self.function_name.zeroize();
        self.function_name.extend_from_slice(function_name);
        self.derive();
        Ok(())
      }
    }

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Extendable,
        sizes: SizeSet::Unbounded,
        default_size: 0,
        block_len: $rate,
        parameters: &[Parameter::FunctionName, Parameter::Customization { max_len: None }],
      };
    }
  };
}

cshake!(
  /// cSHAKE128: SHAKE128 with function-name and customization domain
  /// separation.
  CShake128, 168, "cSHAKE128"
);
cshake!(
  /// cSHAKE256: SHAKE256 with function-name and customization domain
  /// separation.
  CShake256, 136, "cSHAKE256"
);

/// Keyed KMAC state shared by the fixed and XOF variants.
#[derive(Clone)]
struct KmacCore<const RATE: usize> {
  session: Prefixed<RATE>,
  key: Zeroizing<Vec<u8>>,
  customization: Vec<u8>,
}

impl<const RATE: usize> KmacCore<RATE> {
  fn new(key: &[u8], customization: &[u8]) -> Self {
    let mut core = Self {
      session: Prefixed::default(),
      key: Zeroizing::new(key.to_vec()),
      customization: customization.to_vec(),
    };
    core.derive();
    core
  }

  fn derive(&mut self) {
    let (key, s) = (&self.key, &self.customization);
    self.session.rebase(|sponge| {
      absorb_cshake_prefix(sponge, b"KMAC", s);
      let mut b = [0u8; 9];
      sponge.update(left_encode(RATE as u64, &mut b));
      absorb_encode_string(sponge, key);
      sponge.pad_zeroes();
    });
  }

  fn set_key(&mut self, key: &[u8]) {
    self.key.zeroize();
    self.key.extend_from_slice(key);
    self.derive();
  }

  fn set_customization(&mut self, customization: &[u8]) {
    self.customization.zeroize();
    self.customization.extend_from_slice(customization);
    self.derive();
  }

  /// Append `right_encode(output_bits)` and switch to squeezing. `0` selects
  /// the XOF variant.
  fn finish(sponge: &mut KeccakSponge<RATE>, output_bits: u64) {
    if !sponge.is_squeezing() {
      let mut b = [0u8; 9];
      sponge.update(right_encode(output_bits, &mut b));
      sponge.finish(DS_CSHAKE);
    }
  }

  fn init(&mut self) {
    if self.session.stale {
      self.derive();
    } else {
      self.session.restart();
    }
  }

  fn clear(&mut self) {
    self.session.clear();
    self.key.zeroize();
    self.customization.zeroize();
  }
}

/// Largest KMAC tag: 8 KiB.
const KMAC_MAX_BITS: usize = 8192 * 8;

const KMAC_SIZES: SizeSet = SizeSet::Range {
  min: 8,
  max: KMAC_MAX_BITS,
  step: 8,
};

const KMAC_PARAMETERS: &[Parameter] = &[Parameter::Key { max_len: None }, Parameter::Customization { max_len: None }];

macro_rules! kmac {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $default_bits:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      core: KmacCore<$rate>,
      bits: usize,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new(&[], &[])
      }
    }

    impl $name {
      /// KMAC with the default output size.
      #[inline]
      #[must_use]
      pub fn new(key: &[u8], customization: &[u8]) -> Self {
        Self {
          core: KmacCore::new(key, customization),
          bits: $default_bits,
        }
      }

      /// One-shot MAC of `data` with `out.len()` bytes of output.
      #[inline]
      pub fn mac_into(key: &[u8], customization: &[u8], data: &[u8], out: &mut [u8]) {
        let mut h = Self::new(key, customization);
        h.core.session.live.update(data);
        h.finalize_into(out);
      }

      /// Compare the MAC of everything absorbed so far against `tag`
      /// without early exit. The tag must be exactly `hash_size() / 8`
      /// bytes.
      ///
      /// # Errors
      ///
      /// [`VerificationError`] when the tag has the wrong length or the
      /// tags differ.
      pub fn verify(&self, tag: &[u8]) -> Result<(), VerificationError> {
        if tag.len() != self.bits / 8 {
          return Err(VerificationError::new());
        }
        let mut computed = Zeroizing::new(alloc::vec![0u8; tag.len()]);
        self.finalize_into(&mut computed);
        let diff = computed.iter().zip(tag).fold(0u8, |acc, (a, b)| acc | (a ^ b));
        if diff == 0 {
          Ok(())
        } else {
          Err(VerificationError::new())
        }
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        self.core.init();
      }

      #[inline]
      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.core.session.live.absorb(data)
      }

      #[inline]
      fn clear(&mut self) {
        self.core.clear();
      }
    }

    impl FixedOutput for $name {
      #[inline]
      fn hash_size(&self) -> usize {
        self.bits
      }

      /// Output length is taken from `out`, so this doubles as the
      /// variable-length KMAC.
      fn finalize_into(&self, out: &mut [u8]) {
        let mut sponge = self.core.session.live.clone();
        KmacCore::finish(&mut sponge, (out.len() as u64) * 8);
        sponge.read(out);
      }
    }

    impl WithHashSize for $name {
      fn with_hash_size(bits: usize) -> Result<Self, HashError> {
        let mut h = Self::new(&[], &[]);
        h.bits = KMAC_SIZES.validate(bits)?;
        Ok(h)
      }
    }

    impl SetKey for $name {
      #[inline]
      fn set_key(&mut self, key: &[u8]) -> Result<(), HashError> {
        self.core.set_key(key);
        Ok(())
      }
    }

    impl SetCustomization for $name {
      #[inline]
      fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError> {
        self.core.set_customization(customization);
        Ok(())
      }
    }

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Fixed,
        sizes: KMAC_SIZES,
        default_size: $default_bits,
        block_len: $rate,
        parameters: KMAC_PARAMETERS,
      };
    }
  };
}

kmac!(
  /// KMAC128 message authentication code (default 256-bit tag).
  Kmac128, 168, 256, "KMAC128"
);
kmac!(
  /// KMAC256 message authentication code (default 512-bit tag).
  Kmac256, 136, 512, "KMAC256"
);

macro_rules! kmac_xof {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      core: KmacCore<$rate>,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new(&[], &[])
      }
    }

    impl $name {
      #[inline]
      #[must_use]
      pub fn new(key: &[u8], customization: &[u8]) -> Self {
        Self {
          core: KmacCore::new(key, customization),
        }
      }

      /// Reader over the output of everything absorbed so far. `self` is
      /// left absorbing.
      #[must_use]
      pub fn finalize_xof(&self) -> KeccakXof<$rate> {
        let mut sponge = self.core.session.live.clone();
        KmacCore::finish(&mut sponge, 0);
        KeccakXof::new(sponge, DS_CSHAKE)
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        self.core.init();
      }

      #[inline]
      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.core.session.live.absorb(data)
      }

      #[inline]
      fn clear(&mut self) {
        self.core.clear();
      }
    }

    impl ExtendableOutput for $name {
      #[inline]
      fn squeeze(&mut self, out: &mut [u8]) {
        KmacCore::finish(&mut self.core.session.live, 0);
        self.core.session.live.read(out);
      }

      #[inline]
      fn is_squeezing(&self) -> bool {
        self.core.session.live.is_squeezing()
      }
    }

    impl SetKey for $name {
      #[inline]
      fn set_key(&mut self, key: &[u8]) -> Result<(), HashError> {
        self.core.set_key(key);
        Ok(())
      }
    }

    impl SetCustomization for $name {
      #[inline]
      fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError> {
        self.core.set_customization(customization);
        Ok(())
      }
    }

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Extendable,
        sizes: SizeSet::Unbounded,
        default_size: 0,
        block_len: $rate,
        parameters: KMAC_PARAMETERS,
      };
    }
  };
}

kmac_xof!(
  /// KMACXOF128: KMAC128 with arbitrary-length output.
  KmacXof128, 168, "KMACXOF128"
);
kmac_xof!(
  /// KMACXOF256: KMAC256 with arbitrary-length output.
  KmacXof256, 136, "KMACXOF256"
);

#[cfg(test)]
mod tests {
  use traits::Xof as _;

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

  #[test]
  fn encodings() {
    let mut b = [0u8; 9];
    assert_eq!(left_encode(0, &mut b), &[1, 0]);
    assert_eq!(left_encode(168, &mut b), &[1, 168]);
    assert_eq!(left_encode(256, &mut b), &[2, 1, 0]);
    assert_eq!(right_encode(0, &mut b), &[0, 1]);
    assert_eq!(right_encode(256, &mut b), &[1, 0, 2]);
  }

  #[test]
  fn cshake_empty_strings_equal_shake() {
    let mut a = [0u8; 64];
    let mut b = [0u8; 64];
    CShake128::hash_into(b"", b"", b"abc", &mut a);
    super::super::Shake128::hash_into(b"abc", &mut b);
    assert_eq!(a, b);
  }

  #[test]
  fn cshake_sample_vectors() {
    // SP 800-185 cSHAKE samples #1 and #3.
    let data = [0u8, 1, 2, 3];
    let mut out = [0u8; 32];
    CShake128::hash_into(b"", b"Email Signature", &data, &mut out);
    assert_eq!(hex(&out), "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5");

    let mut out = [0u8; 64];
    CShake256::hash_into(b"", b"Email Signature", &data, &mut out);
    assert_eq!(
      hex(&out),
      "d008828e2b80ac9d2218ffee1d070c48b8e4c87bff32c9699d5b6896eee0edd164020e2be0560858d9c00c037e34a96937c561a74c412bb4c746469527281c8c"
    );
  }

  #[test]
  fn kmac_sample_vectors() {
    let key: alloc::vec::Vec<u8> = (0x40u8..=0x5f).collect();
    let data = [0u8, 1, 2, 3];

    let mut out = [0u8; 32];
    Kmac128::mac_into(&key, b"", &data, &mut out);
    assert_eq!(hex(&out), "e5780b0d3ea6f7d3a429c5706aa43a00fadbd7d49628839e3187243f456ee14e");

    let mut out = [0u8; 64];
    Kmac256::mac_into(&key, b"My Tagged Application", &data, &mut out);
    assert_eq!(
      hex(&out),
      "20c570c31346f703c9ac36c61c03cb64c3970d0cfc787e9b79599d273a68d2f7f69d4cc3de9d104a351689f27cf6f5951f0103f33f4f24871024d9c27773a8dd"
    );

    let mut h = KmacXof128::new(&key, b"");
    h.update(&data).unwrap();
    let mut out = [0u8; 32];
    h.finalize_xof().squeeze(&mut out);
    assert_eq!(hex(&out), "cd83740bbd92ccc8cf032b1481a0f4460e7ca9dd12b08a0c4031178bacd6ec35");

    let mut h = KmacXof256::new(&key, b"My Tagged Application");
    h.update(&data).unwrap();
    let mut out = [0u8; 64];
    h.squeeze(&mut out);
    assert_eq!(
      hex(&out),
      "1755133f1534752aad0748f2c706fb5c784512cab835cd15676b16c0c6647fa96faa7af634a0bf8ff6df39374fa00fad9a39e322a7c92065a64eb1fb0801eb2b"
    );
  }

  #[test]
  fn kmac_verify() {
    let mut h = Kmac128::new(b"key", b"app");
    h.update(b"message").unwrap();
    let mut tag = [0u8; 32];
    h.finalize_into(&mut tag);
    assert!(h.verify(&tag).is_ok());
    tag[5] ^= 1;
    assert_eq!(h.verify(&tag), Err(VerificationError::new()));
  }

  #[test]
  fn kmac_verify_requires_full_tag() {
    let mut h = Kmac256::new(b"secret key", b"app");
    h.update(b"attacker chosen message").unwrap();
    let mut tag = [0u8; 64];
    h.finalize_into(&mut tag);
    assert!(h.verify(&tag).is_ok());

    assert_eq!(h.verify(&[]), Err(VerificationError::new()));
    assert_eq!(h.verify(&tag[..1]), Err(VerificationError::new()));
    assert_eq!(h.verify(&tag[..32]), Err(VerificationError::new()));

    // A correct KMAC computed at a different length is still rejected.
    let mut longer = [0u8; 65];
    h.finalize_into(&mut longer);
    assert_eq!(h.verify(&longer), Err(VerificationError::new()));

    let mut short = Kmac128::with_hash_size(64).unwrap();
    short.update(b"m").unwrap();
    let mut tag = [0u8; 8];
    short.finalize_into(&mut tag);
    assert!(short.verify(&tag).is_ok());
    assert!(short.verify(&tag[..7]).is_err());
  }

  #[test]
  fn kmac_block_aligned_keys() {
    // bytepad(encode_string(K), rate) fills exactly one block.
    let mut out = [0u8; 64];
    Kmac256::mac_into(&[0u8; 131], b"", b"abc", &mut out);
    assert_eq!(
      hex(&out),
      "5cce3bbb198a9b6d89ea687aa16efa5e6e72b154e293c82317e65007ffc57c9902b4711633e85efd4c3d11f3b3e9f75188190ccdcee412cc2da03b5ef0457b48"
    );

    let mut out = [0u8; 32];
    Kmac128::mac_into(&[0u8; 163], b"", b"abc", &mut out);
    assert_eq!(hex(&out), "aa2db3e9357cbe17e319351c6d67aa514ac921b66a586da88f19bcb6f2509fa2");
  }

  #[test]
  fn setters_match_constructor() {
    let mut h = Kmac256::default();
    h.update(b"discarded").unwrap();
    h.set_key(b"key").unwrap();
    h.set_customization(b"custom").unwrap();
    h.update(b"data").unwrap();

    let mut via_setters = [0u8; 64];
    h.finalize_into(&mut via_setters);
    let mut direct = [0u8; 64];
    Kmac256::mac_into(b"key", b"custom", b"data", &mut direct);
    assert_eq!(via_setters, direct);
  }

  #[test]
  fn clear_forgets_key() {
    let mut keyed = Kmac128::new(b"secret key", b"");
    keyed.clear();
    assert!(keyed.core.session.live.is_zeroed());
    assert!(keyed.core.session.initial.is_zeroed());
    assert!(keyed.core.key.is_empty());
    keyed.init();
    keyed.update(b"x").unwrap();

    let mut unkeyed = Kmac128::new(b"", b"");
    unkeyed.update(b"x").unwrap();

    let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
    keyed.finalize_into(&mut a);
    unkeyed.finalize_into(&mut b);
    assert_eq!(a, b);
  }

  #[test]
  fn kmac_sizes() {
    assert_eq!(Kmac128::with_hash_size(100).err(), Some(HashError::UnsupportedSize { bits: 100 }));
    assert_eq!(Kmac128::with_hash_size(0).err(), Some(HashError::UnsupportedSize { bits: 0 }));
    assert_eq!(Kmac256::with_hash_size(136).map(|h| h.hash_size()), Ok(136));
    assert_eq!(Kmac128::with_hash_size(KMAC_MAX_BITS).map(|h| h.hash_size()), Ok(KMAC_MAX_BITS));
    assert_eq!(
      Kmac256::with_hash_size(KMAC_MAX_BITS + 8).err(),
      Some(HashError::UnsupportedSize { bits: KMAC_MAX_BITS + 8 })
    );
    assert_eq!(
      Kmac128::with_hash_size(1 << 60).err(),
      Some(HashError::UnsupportedSize { bits: 1 << 60 })
    );
  }
}
