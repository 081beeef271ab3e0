//! BLAKE2b (RFC 7693) with the full parameter block: keyed, salted,
//! personalized, and the tree fields BLAKE2bp needs.
//!
//! Portable, `no_std`, pure Rust implementation.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use traits::{Digest, FixedOutput, HashError, HashProvider, SetKey, SetPersonalization, SetSalt, WithHashSize};
use zeroize::{Zeroize, Zeroizing};

use crate::{
  absorb::BlockBuffer,
  introspect::{AlgorithmInfo, Describe, OutputKind, Parameter, SizeSet},
};

pub(crate) const BLOCK_LEN: usize = 128;
pub(crate) const OUT_LEN: usize = 64;
pub(crate) const KEY_LEN: usize = 64;
const SALT_LEN: usize = 16;
const PERSONAL_LEN: usize = 16;

pub(crate) const SIZES: SizeSet = SizeSet::Range {
  min: 8,
  max: OUT_LEN * 8,
  step: 8,
};
pub(crate) const PARAMETERS: &[Parameter] = &[
  Parameter::Key { max_len: Some(KEY_LEN) },
  Parameter::Salt { len: SALT_LEN },
  Parameter::Personalization { len: PERSONAL_LEN },
];

const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

#[inline(always)]
fn g(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64, x: u64, y: u64) {
  *a = a.wrapping_add(*b).wrapping_add(x);
  *d = (*d ^ *a).rotate_right(32);
  *c = c.wrapping_add(*d);
  *b = (*b ^ *c).rotate_right(24);
  *a = a.wrapping_add(*b).wrapping_add(y);
  *d = (*d ^ *a).rotate_right(16);
  *c = c.wrapping_add(*d);
  *b = (*b ^ *c).rotate_right(63);
}

#[inline(always)]
fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u128, f0: u64, f1: u64) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (i, c) in chunks.iter().enumerate() {
    m[i] = u64::from_le_bytes(*c);
  }

  let mut v0 = h[0];
  let mut v1 = h[1];
  let mut v2 = h[2];
  let mut v3 = h[3];
  let mut v4 = h[4];
  let mut v5 = h[5];
  let mut v6 = h[6];
  let mut v7 = h[7];

  let mut v8 = IV[0];
  let mut v9 = IV[1];
  let mut v10 = IV[2];
  let mut v11 = IV[3];
  let mut v12 = IV[4] ^ (t as u64);
  let mut v13 = IV[5] ^ ((t >> 64) as u64);
  let mut v14 = IV[6] ^ f0;
  let mut v15 = IV[7] ^ f1;

  macro_rules! round {
    ($r:expr) => {{
      let s = &SIGMA[$r];

      g(&mut v0, &mut v4, &mut v8, &mut v12, m[s[0]], m[s[1]]);
      g(&mut v1, &mut v5, &mut v9, &mut v13, m[s[2]], m[s[3]]);
      g(&mut v2, &mut v6, &mut v10, &mut v14, m[s[4]], m[s[5]]);
      g(&mut v3, &mut v7, &mut v11, &mut v15, m[s[6]], m[s[7]]);

      g(&mut v0, &mut v5, &mut v10, &mut v15, m[s[8]], m[s[9]]);
      g(&mut v1, &mut v6, &mut v11, &mut v12, m[s[10]], m[s[11]]);
      g(&mut v2, &mut v7, &mut v8, &mut v13, m[s[12]], m[s[13]]);
      g(&mut v3, &mut v4, &mut v9, &mut v14, m[s[14]], m[s[15]]);
    }};
  }

  round!(0);
  round!(1);
  round!(2);
  round!(3);
  round!(4);
  round!(5);
  round!(6);
  round!(7);
  round!(8);
  round!(9);
  round!(10);
  round!(11);

  h[0] ^= v0 ^ v8;
  h[1] ^= v1 ^ v9;
  h[2] ^= v2 ^ v10;
  h[3] ^= v3 ^ v11;
  h[4] ^= v4 ^ v12;
  h[5] ^= v5 ^ v13;
  h[6] ^= v6 ^ v14;
  h[7] ^= v7 ^ v15;
}

/// The 64-byte BLAKE2b parameter block.
#[derive(Clone, Copy)]
pub(crate) struct Params {
  pub(crate) digest_len: u8,
  pub(crate) key_len: u8,
  pub(crate) fanout: u8,
  pub(crate) depth: u8,
  pub(crate) leaf_len: u32,
  pub(crate) node_offset: u64,
  pub(crate) node_depth: u8,
  pub(crate) inner_len: u8,
  pub(crate) salt: [u8; SALT_LEN],
  pub(crate) personal: [u8; PERSONAL_LEN],
}

impl Params {
  /// Sequential mode: fanout 1, depth 1, no tree fields.
  pub(crate) const fn sequential(digest_len: usize) -> Self {
    Self {
      digest_len: digest_len as u8,
      key_len: 0,
      fanout: 1,
      depth: 1,
      leaf_len: 0,
      node_offset: 0,
      node_depth: 0,
      inner_len: 0,
      salt: [0u8; SALT_LEN],
      personal: [0u8; PERSONAL_LEN],
    }
  }

  fn to_bytes(self) -> [u8; 64] {
    let mut p = [0u8; 64];
    p[0] = self.digest_len;
    p[1] = self.key_len;
    p[2] = self.fanout;
    p[3] = self.depth;
    p[4..8].copy_from_slice(&self.leaf_len.to_le_bytes());
    p[8..16].copy_from_slice(&self.node_offset.to_le_bytes());
    p[16] = self.node_depth;
    p[17] = self.inner_len;
    p[32..48].copy_from_slice(&self.salt);
    p[48..64].copy_from_slice(&self.personal);
    p
  }

  fn initial_state(self) -> [u64; 8] {
    let bytes = self.to_bytes();
    let (words, _) = bytes.as_chunks::<8>();
    let mut h = IV;
    for (hw, w) in h.iter_mut().zip(words) {
      *hw ^= u64::from_le_bytes(*w);
    }
    h
  }

  pub(crate) fn clear(&mut self) {
    self.key_len = 0;
    self.salt.zeroize();
    self.personal.zeroize();
  }
}

/// One BLAKE2b node: chain value, pending block, byte counter.
///
/// The buffer flushes at `BLOCK_LEN + 1` so the final block stays buffered
/// until `finalize_into` can flag it.
#[derive(Clone)]
pub(crate) struct Core {
  h: [u64; 8],
  buffer: BlockBuffer<BLOCK_LEN>,
  t: u128,
  last_node: bool,
}

impl Core {
  /// Start a node; a non-empty `key` is absorbed as one zero-padded block.
  pub(crate) fn new(params: &Params, key: &[u8], last_node: bool) -> Self {
    let mut core = Self {
      h: params.initial_state(),
      buffer: BlockBuffer::new(),
      t: 0,
      last_node,
    };
    if !key.is_empty() {
      let mut block = Zeroizing::new([0u8; BLOCK_LEN]);
      block[..key.len()].copy_from_slice(key);
      core.update(&block[..]);
    }
    core
  }

  pub(crate) fn update(&mut self, data: &[u8]) {
    let Self { h, buffer, t, .. } = self;
    buffer.absorb(data, BLOCK_LEN, BLOCK_LEN + 1, |blocks, _| {
      let (blocks, _) = blocks.as_chunks::<BLOCK_LEN>();
      for block in blocks {
        *t = t.wrapping_add(BLOCK_LEN as u128);
        compress(h, block, *t, 0, 0);
      }
    });
  }

  /// Write the first `out.len()` (at most 64) bytes of the digest.
  pub(crate) fn finalize_into(&self, out: &mut [u8]) {
    let mut h = self.h;
    let mut buffer = self.buffer.clone();
    let t = self.t.wrapping_add(buffer.position() as u128);
    let f1 = if self.last_node { u64::MAX } else { 0 };
    let (block, _) = buffer.padded_block(BLOCK_LEN).as_chunks::<BLOCK_LEN>();
    if let Some(block) = block.first() {
      compress(&mut h, block, t, u64::MAX, f1);
    }

    let mut full = [0u8; OUT_LEN];
    for (dst, word) in full.as_chunks_mut::<8>().0.iter_mut().zip(h) {
      *dst = word.to_le_bytes();
    }
    let n = core::cmp::min(out.len(), OUT_LEN);
    out[..n].copy_from_slice(&full[..n]);
    full.zeroize();
    h.zeroize();
    buffer.zeroize();
  }

  pub(crate) fn clear(&mut self) {
    self.h.zeroize();
    self.buffer.zeroize();
    self.t = 0;
  }

  #[cfg(test)]
  fn is_zeroed(&self) -> bool {
    self.h.iter().all(|&w| w == 0) && self.buffer.bytes().iter().all(|&b| b == 0)
  }
}

impl Drop for Core {
  fn drop(&mut self) {
    self.clear();
  }
}

/// BLAKE2b with a runtime digest size of 8..=512 bits and optional key, salt
/// and personalization.
///
/// Setting a parameter restarts the computation.
#[derive(Clone)]
pub struct Blake2b {
  core: Core,
  params: Params,
  key: Zeroizing<[u8; KEY_LEN]>,
}

impl Default for Blake2b {
  #[inline]
  fn default() -> Self {
    Self::with_len(OUT_LEN)
  }
}

impl Blake2b {
  fn with_len(len: usize) -> Self {
    let params = Params::sequential(len);
    Self {
      core: Core::new(&params, &[], false),
      params,
      key: Zeroizing::new([0u8; KEY_LEN]),
    }
  }

  /// # Errors
  ///
  /// [`HashError::UnsupportedSize`] unless `bits` is a multiple of 8 in
  /// `8..=512`.
  pub fn new(bits: usize) -> Result<Self, HashError> {
    Ok(Self::with_len(SIZES.validate(bits)? / 8))
  }

  #[inline]
  fn key(&self) -> &[u8] {
    &self.key[..self.params.key_len as usize]
  }

  fn restart(&mut self) {
    self.core = Core::new(&self.params, self.key(), false);
  }
}

impl HashProvider for Blake2b {
  const NAME: &'static str = "BLAKE2b";

  #[inline]
  fn init(&mut self) {
    self.restart();
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    self.core.update(data);
    Ok(())
  }

  fn clear(&mut self) {
    self.core.clear();
    self.key.zeroize();
    self.params.clear();
  }
}

impl FixedOutput for Blake2b {
  #[inline]
  fn hash_size(&self) -> usize {
    self.params.digest_len as usize * 8
  }

  #[inline]
  fn finalize_into(&self, out: &mut [u8]) {
    let n = core::cmp::min(out.len(), self.params.digest_len as usize);
    self.core.finalize_into(&mut out[..n]);
  }
}

impl WithHashSize for Blake2b {
  #[inline]
  fn with_hash_size(bits: usize) -> Result<Self, HashError> {
    Self::new(bits)
  }
}

impl SetKey for Blake2b {
  fn set_key(&mut self, key: &[u8]) -> Result<(), HashError> {
    PARAMETERS[0].check_len(key.len())?;
    self.key.zeroize();
    self.key[..key.len()].copy_from_slice(key);
    self.params.key_len = key.len() as u8;
    self.restart();
    Ok(())
  }
}

impl SetSalt for Blake2b {
  fn set_salt(&mut self, salt: &[u8]) -> Result<(), HashError> {
    PARAMETERS[1].check_len(salt.len())?;
    self.params.salt.copy_from_slice(salt);
    self.restart();
    Ok(())
  }
}

impl SetPersonalization for Blake2b {
  fn set_personalization(&mut self, personalization: &[u8]) -> Result<(), HashError> {
    PARAMETERS[2].check_len(personalization.len())?;
    self.params.personal.copy_from_slice(personalization);
    self.restart();
    Ok(())
  }
}

impl Describe for Blake2b {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "BLAKE2b",
    output: OutputKind::Fixed,
    sizes: SIZES,
    default_size: OUT_LEN * 8,
    block_len: BLOCK_LEN,
    parameters: PARAMETERS,
  };
}

/// Unkeyed BLAKE2b-512.
#[derive(Clone)]
pub struct Blake2b512 {
  core: Core,
}

impl Default for Blake2b512 {
  #[inline]
  fn default() -> Self {
    Self {
      core: Core::new(&Params::sequential(OUT_LEN), &[], false),
    }
  }
}

impl Blake2b512 {
  #[inline]
  fn wipe(&mut self) {
    self.core.clear();
  }
}

impl Digest for Blake2b512 {
  const OUTPUT_SIZE: usize = OUT_LEN;
  type Output = [u8; OUT_LEN];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.core.update(data);
  }

  fn finalize(&self) -> Self::Output {
    let mut out = [0u8; OUT_LEN];
    self.core.finalize_into(&mut out);
    out
  }

  #[inline]
  fn reset(&mut self) {
    *self = Self::default();
  }
}

impl_digest_provider!(Blake2b512, "BLAKE2b-512");

impl Describe for Blake2b512 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "BLAKE2b-512",
    output: OutputKind::Fixed,
    sizes: SizeSet::Fixed(OUT_LEN * 8),
    default_size: OUT_LEN * 8,
    block_len: BLOCK_LEN,
    parameters: &[],
  };
}
