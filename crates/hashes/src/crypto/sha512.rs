//! SHA-384 and the SHA-512 family (FIPS 180-4).
//!
//! [`Sha512`] selects its output size at runtime (224, 256, 384 or 512 bits)
//! and starts from the IV that size defines; the sized types are the
//! compile-time counterparts.

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + compression schedule

use traits::{Digest, FixedOutput, HashError, HashProvider, WithHashSize};
use zeroize::Zeroize;

use crate::{
  absorb::BlockBuffer,
  introspect::{AlgorithmInfo, Describe, OutputKind, SizeSet},
};

const BLOCK_LEN: usize = 128;
const LEN_OFFSET: usize = BLOCK_LEN - 16;

const SIZES: SizeSet = SizeSet::OneOf(&[224, 256, 384, 512]);

const SHA512_H0: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

const SHA384_H0: [u64; 8] = [
  0xcbbb_9d5d_c105_9ed8,
  0x629a_292a_367c_d507,
  0x9159_015a_3070_dd17,
  0x152f_ecd8_f70e_5939,
  0x6733_2667_ffc0_0b31,
  0x8eb4_4a87_6858_1511,
  0xdb0c_2e0d_64f9_8fa7,
  0x47b5_481d_befa_4fa4,
];

// SHA-512/t IVs, generated per FIPS 180-4 section 5.3.6.
const SHA512_224_H0: [u64; 8] = [
  0x8c3d_37c8_1954_4da2,
  0x73e1_9966_89dc_d4d6,
  0x1dfa_b7ae_32ff_9c82,
  0x679d_d514_582f_9fcf,
  0x0f6d_2b69_7bd4_4da8,
  0x77e3_6f73_04c4_8942,
  0x3f9d_85a8_6a1d_36c8,
  0x1112_e6ad_91d6_92a1,
];

const SHA512_256_H0: [u64; 8] = [
  0x2231_2194_fc2b_f72c,
  0x9f55_5fa3_c84c_64c2,
  0x2393_b86b_6f53_b151,
  0x9638_7719_5940_eabd,
  0x9628_3ee2_a88e_ffe3,
  0xbe5e_1e25_5386_3992,
  0x2b01_99fc_2c85_b8aa,
  0x0eb7_2ddc_81c5_2ca2,
];

const K: [u64; 80] = [
  0x428a_2f98_d728_ae22,
  0x7137_4491_23ef_65cd,
  0xb5c0_fbcf_ec4d_3b2f,
  0xe9b5_dba5_8189_dbbc,
  0x3956_c25b_f348_b538,
  0x59f1_11f1_b605_d019,
  0x923f_82a4_af19_4f9b,
  0xab1c_5ed5_da6d_8118,
  0xd807_aa98_a303_0242,
  0x1283_5b01_4570_6fbe,
  0x2431_85be_4ee4_b28c,
  0x550c_7dc3_d5ff_b4e2,
  0x72be_5d74_f27b_896f,
  0x80de_b1fe_3b16_96b1,
  0x9bdc_06a7_25c7_1235,
  0xc19b_f174_cf69_2694,
  0xe49b_69c1_9ef1_4ad2,
  0xefbe_4786_384f_25e3,
  0x0fc1_9dc6_8b8c_d5b5,
  0x240c_a1cc_77ac_9c65,
  0x2de9_2c6f_592b_0275,
  0x4a74_84aa_6ea6_e483,
  0x5cb0_a9dc_bd41_fbd4,
  0x76f9_88da_8311_53b5,
  0x983e_5152_ee66_dfab,
  0xa831_c66d_2db4_3210,
  0xb003_27c8_98fb_213f,
  0xbf59_7fc7_beef_0ee4,
  0xc6e0_0bf3_3da8_8fc2,
  0xd5a7_9147_930a_a725,
  0x06ca_6351_e003_826f,
  0x1429_2967_0a0e_6e70,
  0x27b7_0a85_46d2_2ffc,
  0x2e1b_2138_5c26_c926,
  0x4d2c_6dfc_5ac4_2aed,
  0x5338_0d13_9d95_b3df,
  0x650a_7354_8baf_63de,
  0x766a_0abb_3c77_b2a8,
  0x81c2_c92e_47ed_aee6,
  0x9272_2c85_1482_353b,
  0xa2bf_e8a1_4cf1_0364,
  0xa81a_664b_bc42_3001,
  0xc24b_8b70_d0f8_9791,
  0xc76c_51a3_0654_be30,
  0xd192_e819_d6ef_5218,
  0xd699_0624_5565_a910,
  0xf40e_3585_5771_202a,
  0x106a_a070_32bb_d1b8,
  0x19a4_c116_b8d2_d0c8,
  0x1e37_6c08_5141_ab53,
  0x2748_774c_df8e_eb99,
  0x34b0_bcb5_e19b_48a8,
  0x391c_0cb3_c5c9_5a63,
  0x4ed8_aa4a_e341_8acb,
  0x5b9c_ca4f_7763_e373,
  0x682e_6ff3_d6b2_b8a3,
  0x748f_82ee_5def_b2fc,
  0x78a5_636f_4317_2f60,
  0x84c8_7814_a1f0_ab72,
  0x8cc7_0208_1a64_39ec,
  0x90be_fffa_2363_1e28,
  0xa450_6ceb_de82_bde9,
  0xbef9_a3f7_b2c6_7915,
  0xc671_78f2_e372_532b,
  0xca27_3ece_ea26_619c,
  0xd186_b8c7_21c0_c207,
  0xeada_7dd6_cde0_eb1e,
  0xf57d_4f7f_ee6e_d178,
  0x06f0_67aa_7217_6fba,
  0x0a63_7dc5_a2c8_98a6,
  0x113f_9804_bef9_0dae,
  0x1b71_0b35_131c_471b,
  0x28db_77f5_2304_7d84,
  0x32ca_ab7b_40c7_2493,
  0x3c9e_be0a_15c9_bebc,
  0x431d_67c4_9c10_0d4c,
  0x4cc5_d4be_cb3e_42b6,
  0x597f_299c_fc65_7e2a,
  0x5fcb_6fab_3ad6_faec,
  0x6c44_198c_4a47_5817,
];

#[inline(always)]
fn ch(x: u64, y: u64, z: u64) -> u64 {
  (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u64, y: u64, z: u64) -> u64 {
  (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u64) -> u64 {
  x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline(always)]
fn big_sigma1(x: u64) -> u64 {
  x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline(always)]
fn small_sigma0(x: u64) -> u64 {
  x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn small_sigma1(x: u64) -> u64 {
  x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

fn compress(state: &mut [u64; 8], blocks: &[u8]) {
  let (blocks, _) = blocks.as_chunks::<BLOCK_LEN>();
  for block in blocks {
    let mut w = [0u64; 16];
    for (wi, c) in w.iter_mut().zip(block.as_chunks::<8>().0) {
      *wi = u64::from_be_bytes(*c);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
    for (i, &k) in K.iter().enumerate() {
      if i >= 16 {
        w[i & 15] = small_sigma1(w[(i - 2) & 15])
          .wrapping_add(w[(i - 7) & 15])
          .wrapping_add(small_sigma0(w[(i - 15) & 15]))
          .wrapping_add(w[i & 15]);
      }
      let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(k)
        .wrapping_add(w[i & 15]);
      let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

      h = g;
      g = f;
      f = e;
      e = d.wrapping_add(t1);
      d = c;
      c = b;
      b = a;
      a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
      *s = s.wrapping_add(v);
    }
  }
}

#[derive(Clone)]
struct Core {
  state: [u64; 8],
  buffer: BlockBuffer<BLOCK_LEN>,
}

impl Core {
  #[inline]
  const fn new(iv: [u64; 8]) -> Self {
    Self {
      state: iv,
      buffer: BlockBuffer::new(),
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    let state = &mut self.state;
    self
      .buffer
      .absorb(data, BLOCK_LEN, BLOCK_LEN, |blocks, _| compress(state, blocks));
  }

  /// Pad with `0x80`, zeros and the 128-bit message length; write the first
  /// `out.len()` bytes of the big-endian state.
  fn finalize_into(&self, out: &mut [u8]) {
    let mut state = self.state;
    let mut buffer = self.buffer.clone();
    let bit_len = u128::from(buffer.total()).wrapping_mul(8);
    let pos = buffer.position();

    let block = buffer.padded_block(BLOCK_LEN);
    block[pos] = 0x80;
    if pos >= LEN_OFFSET {
      compress(&mut state, block);
      block.fill(0);
    }
    block[LEN_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
    compress(&mut state, block);

    for (dst, word) in out.chunks_mut(8).zip(state) {
      dst.copy_from_slice(&word.to_be_bytes()[..dst.len()]);
    }
    buffer.zeroize();
  }

  fn clear(&mut self) {
    self.state.zeroize();
    self.buffer.zeroize();
  }
}

const fn iv_for(bits: usize) -> [u64; 8] {
  match bits {
    224 => SHA512_224_H0,
    256 => SHA512_256_H0,
    384 => SHA384_H0,
    _ => SHA512_H0,
  }
}

/// SHA-512 with a runtime output size of 224, 256, 384 or 512 bits.
///
/// 384 is SHA-384; 224 and 256 are SHA-512/224 and SHA-512/256.
#[derive(Clone)]
pub struct Sha512 {
  core: Core,
  bits: usize,
}

impl Default for Sha512 {
  #[inline]
  fn default() -> Self {
    Self {
      core: Core::new(SHA512_H0),
      bits: 512,
    }
  }
}

impl Sha512 {
  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] unless `bits` is 224, 256, 384 or 512.
  pub fn new(bits: usize) -> Result<Self, HashError> {
    let bits = SIZES.validate(bits)?;
    Ok(Self {
      core: Core::new(iv_for(bits)),
      bits,
    })
  }
}

impl HashProvider for Sha512 {
  const NAME: &'static str = "SHA-512";

  #[inline]
  fn init(&mut self) {
    self.core = Core::new(iv_for(self.bits));
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    self.core.update(data);
    Ok(())
  }

  #[inline]
  fn clear(&mut self) {
    self.core.clear();
  }
}

impl FixedOutput for Sha512 {
  #[inline]
  fn hash_size(&self) -> usize {
    self.bits
  }

  #[inline]
  fn finalize_into(&self, out: &mut [u8]) {
    let n = core::cmp::min(out.len(), self.bits / 8);
    self.core.finalize_into(&mut out[..n]);
  }
}

impl WithHashSize for Sha512 {
  #[inline]
  fn with_hash_size(bits: usize) -> Result<Self, HashError> {
    Self::new(bits)
  }
}

impl Describe for Sha512 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "SHA-512",
    output: OutputKind::Fixed,
    sizes: SIZES,
    default_size: 512,
    block_len: BLOCK_LEN,
    parameters: &[],
  };
}

macro_rules! sha512_truncated {
  ($(#[$meta:meta])* $name:ident, $iv:expr, $len:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      core: Core,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self { core: Core::new($iv) }
      }
    }

    impl $name {
      #[inline]
      fn wipe(&mut self) {
        self.core.clear();
      }
    }

    impl Digest for $name {
      const OUTPUT_SIZE: usize = $len;
      type Output = [u8; $len];

      #[inline]
      fn new() -> Self {
        Self::default()
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.core.update(data);
      }

      #[inline]
      fn finalize(&self) -> Self::Output {
        let mut out = [0u8; $len];
        self.core.finalize_into(&mut out);
        out
      }

      #[inline]
      fn reset(&mut self) {
        *self = Self::default();
      }
    }

    impl_digest_provider!($name, $label);

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Fixed,
        sizes: SizeSet::Fixed($len * 8),
        default_size: $len * 8,
        block_len: BLOCK_LEN,
        parameters: &[],
      };
    }
  };
}

sha512_truncated!(
  /// SHA-384.
  Sha384, SHA384_H0, 48, "SHA-384"
);
sha512_truncated!(
  /// SHA-512/224.
  Sha512_224, SHA512_224_H0, 28, "SHA-512/224"
);
sha512_truncated!(
  /// SHA-512/256.
  Sha512_256, SHA512_256_H0, 32, "SHA-512/256"
);

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec;

  use super::*;

  const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

  fn hex(bytes: &[u8]) -> alloc::string::String {
    use alloc::string::String;
    use core::fmt::Write;
    let mut s = String::new();
    for &b in bytes {
      write!(&mut s, "{:02x}", b).unwrap();
    }
    s
  }

  fn runtime(bits: usize, data: &[u8]) -> alloc::vec::Vec<u8> {
    let mut h = Sha512::new(bits).unwrap();
    h.update(data).unwrap();
    let mut out = vec![0u8; bits / 8];
    h.finalize_into(&mut out);
    out
  }

  #[test]
  fn known_vectors() {
    assert_eq!(
      hex(&runtime(512, b"abc")),
      "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
    assert_eq!(
      hex(&runtime(512, FOX)),
      "07e547d9586f6a73f73fbac0435ed76951218fb7d0c8d788a309d785436bbb642e93a252a954f23912547d1e8a3b5ed6e1bfd7097821233fa0538f3db854fee6"
    );
    assert_eq!(
      hex(&Sha384::digest(b"abc")),
      "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
    );
    assert_eq!(
      hex(&Sha512_256::digest(FOX)),
      "dd9d67b371519c339ed8dbd25af90e976a1eeefd4ad3d889005e532fc5bef04d"
    );
    assert_eq!(
      hex(&Sha512_224::digest(b"abc")),
      "4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa"
    );
  }

  #[test]
  fn runtime_sizes_match_sized_types() {
    assert_eq!(runtime(384, FOX), Sha384::digest(FOX).to_vec());
    assert_eq!(runtime(256, FOX), Sha512_256::digest(FOX).to_vec());
    assert_eq!(runtime(224, FOX), Sha512_224::digest(FOX).to_vec());
    assert_eq!(Sha512::new(128).err(), Some(HashError::UnsupportedSize { bits: 128 }));
  }

  #[test]
  fn truncated_ivs_follow_generation_rule() {
    for (label, iv) in [(&b"SHA-512/224"[..], SHA512_224_H0), (&b"SHA-512/256"[..], SHA512_256_H0)] {
      let mut seed = SHA512_H0;
      for w in &mut seed {
        *w ^= 0xa5a5_a5a5_a5a5_a5a5;
      }
      let mut core = Core::new(seed);
      core.update(label);
      let mut out = [0u8; 64];
      core.finalize_into(&mut out);
      let derived: [u64; 8] = core::array::from_fn(|i| {
        let mut w = [0u8; 8];
        w.copy_from_slice(&out[i * 8..i * 8 + 8]);
        u64::from_be_bytes(w)
      });
      assert_eq!(derived, iv);
    }
  }

  #[test]
  fn padding_boundaries_match_streaming() {
    let data: alloc::vec::Vec<u8> = (0..300u32).map(|i| i as u8).collect();
    for len in [111usize, 112, 113, 127, 128, 129, 255, 256] {
      let one = runtime(512, &data[..len]);
      let mut h = Sha512::default();
      for piece in data[..len].chunks(7) {
        h.update(piece).unwrap();
      }
      let mut out = [0u8; 64];
      h.finalize_into(&mut out);
      assert_eq!(out.to_vec(), one, "len {len}");
    }
  }
}
