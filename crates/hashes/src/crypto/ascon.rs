//! Ascon-Hash256, Ascon-XOF128 and Ascon-CXOF128 (NIST SP 800-232).
//!
//! Portable, `no_std`, pure Rust implementation over the 320-bit Ascon
//! permutation with an 8-byte rate.

#![allow(clippy::indexing_slicing)] // Fixed-size state + sponge buffering

use alloc::vec::Vec;

use traits::{Digest, ExtendableOutput, HashError, HashProvider, SetCustomization, Xof};
use zeroize::Zeroize;

use crate::{
  absorb::BlockBuffer,
  introspect::{AlgorithmInfo, Describe, OutputKind, Parameter, SizeSet},
};

const RATE: usize = 8;

/// Longest customization string Ascon-CXOF128 accepts, in bytes.
pub const CXOF_MAX_CUSTOMIZATION: usize = 256;

// Ascon permutation round constants (12 rounds).
const RC: [u64; 12] = [0xF0, 0xE1, 0xD2, 0xC3, 0xB4, 0xA5, 0x96, 0x87, 0x78, 0x69, 0x5A, 0x4B];

// Initial states: the IV block already run through the permutation.
const HASH256_IV: [u64; 5] = [
  0x9b1e_5494_e934_d681,
  0x4bc3_a01e_3337_51d2,
  0xae65_396c_6b34_b81a,
  0x3c7f_d4a4_d56a_4db3,
  0x1a5c_4649_06c5_976d,
];

const XOF128_IV: [u64; 5] = [
  0xda82_ce76_8d94_47eb,
  0xcc7c_e6c7_5f1e_f969,
  0xe750_8fd7_8008_5631,
  0x0ee0_ea53_416b_58cc,
  0xe054_7524_db6f_0bde,
];

const CXOF128_IV: [u64; 5] = [
  0x6755_27c2_a0e8_de03,
  0x43d1_2d7d_c037_7bbc,
  0xe990_1dec_426e_81b5,
  0x2ab1_4907_7207_80b6,
  0x8f3f_1d02_d432_bc46,
];

#[inline(always)]
const fn pad(n: usize) -> u64 {
  0x01_u64 << (8 * n)
}

#[inline(always)]
fn permute_12(s: &mut [u64; 5]) {
  for &c in &RC {
    round(s, c);
  }
}

#[inline(always)]
fn round(s: &mut [u64; 5], c: u64) {
  let [mut x0, mut x1, mut x2, mut x3, mut x4] = *s;

  x2 ^= c;

  // Substitution layer.
  x0 ^= x4;
  x4 ^= x3;
  x2 ^= x1;

  let t0 = (!x0) & x1;
  let t1 = (!x1) & x2;
  let t2 = (!x2) & x3;
  let t3 = (!x3) & x4;
  let t4 = (!x4) & x0;

  x0 ^= t1;
  x1 ^= t2;
  x2 ^= t3;
  x3 ^= t4;
  x4 ^= t0;

  x1 ^= x0;
  x0 ^= x4;
  x3 ^= x2;
  x2 = !x2;

  // Linear diffusion layer.
  x0 ^= x0.rotate_right(19) ^ x0.rotate_right(28);
  x1 ^= x1.rotate_right(61) ^ x1.rotate_right(39);
  x2 ^= x2.rotate_right(1) ^ x2.rotate_right(6);
  x3 ^= x3.rotate_right(10) ^ x3.rotate_right(17);
  x4 ^= x4.rotate_right(7) ^ x4.rotate_right(41);

  *s = [x0, x1, x2, x3, x4];
}

#[derive(Clone, Copy)]
enum Phase {
  Absorbing,
  /// Bytes of the current output block already handed out.
  Squeezing(usize),
}

/// Ascon sponge: 8-byte rate, output drawn from the first state word.
#[derive(Clone)]
struct AsconSponge {
  state: [u64; 5],
  buffer: BlockBuffer<RATE>,
  phase: Phase,
}

impl AsconSponge {
  #[inline]
  const fn with_state(state: [u64; 5]) -> Self {
    Self {
      state,
      buffer: BlockBuffer::new(),
      phase: Phase::Absorbing,
    }
  }

  #[inline(always)]
  fn absorb_blocks(state: &mut [u64; 5], blocks: &[u8]) {
    let (blocks, _) = blocks.as_chunks::<RATE>();
    for block in blocks {
      state[0] ^= u64::from_le_bytes(*block);
      permute_12(state);
    }
  }

  #[inline]
  const fn is_squeezing(&self) -> bool {
    matches!(self.phase, Phase::Squeezing(_))
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    debug_assert!(!self.is_squeezing());
    let state = &mut self.state;
    self
      .buffer
      .absorb(data, RATE, RATE, |blocks, _| Self::absorb_blocks(state, blocks));
  }

  #[inline]
  fn absorb(&mut self, data: &[u8]) -> Result<(), HashError> {
    if self.is_squeezing() {
      return Err(HashError::MisusedSession);
    }
    self.update(data);
    Ok(())
  }

  /// Absorb the padded final block of the current message.
  fn pad_block(&mut self) {
    let len = self.buffer.position();
    let mut last = [0u8; RATE];
    last[..len].copy_from_slice(self.buffer.pending());
    self.state[0] ^= u64::from_le_bytes(last) ^ pad(len);
    permute_12(&mut self.state);
    self.buffer.reset();
  }

  /// Absorbing -> squeezing. A no-op once squeezing.
  fn finish(&mut self) {
    if self.is_squeezing() {
      return;
    }
    self.pad_block();
    self.phase = Phase::Squeezing(0);
  }

  fn read(&mut self, mut out: &mut [u8]) {
    let Phase::Squeezing(mut offset) = self.phase else {
      debug_assert!(false, "read before finish");
      return;
    };

    while !out.is_empty() {
      if offset == RATE {
        permute_12(&mut self.state);
        offset = 0;
      }

      let block = self.state[0].to_le_bytes();
      let take = core::cmp::min(RATE - offset, out.len());
      out[..take].copy_from_slice(&block[offset..offset + take]);
      offset += take;
      out = &mut out[take..];
    }

    self.phase = Phase::Squeezing(offset);
  }

  fn clear(&mut self) {
    self.state.zeroize();
    self.buffer.zeroize();
    self.phase = Phase::Absorbing;
  }
}

impl Drop for AsconSponge {
  fn drop(&mut self) {
    self.clear();
  }
}

/// Ascon-Hash256.
#[derive(Clone)]
pub struct AsconHash256 {
  sponge: AsconSponge,
}

impl Default for AsconHash256 {
  #[inline]
  fn default() -> Self {
    Self {
      sponge: AsconSponge::with_state(HASH256_IV),
    }
  }
}

impl AsconHash256 {
  #[inline]
  fn wipe(&mut self) {
    self.sponge.clear();
  }
}

impl Digest for AsconHash256 {
  const OUTPUT_SIZE: usize = 32;
  type Output = [u8; 32];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.sponge.update(data);
  }

  fn finalize(&self) -> Self::Output {
    let mut sponge = self.sponge.clone();
    sponge.finish();
    let mut out = [0u8; 32];
    sponge.read(&mut out);
    out
  }

  #[inline]
  fn reset(&mut self) {
    *self = Self::default();
  }
}

impl_digest_provider!(AsconHash256, "Ascon-Hash256");

impl Describe for AsconHash256 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "Ascon-Hash256",
    output: OutputKind::Fixed,
    sizes: SizeSet::Fixed(256),
    default_size: 256,
    block_len: RATE,
    parameters: &[],
  };
}

/// Ascon-XOF128 hasher.
#[derive(Clone)]
pub struct AsconXof128 {
  sponge: AsconSponge,
}

impl Default for AsconXof128 {
  #[inline]
  fn default() -> Self {
    Self {
      sponge: AsconSponge::with_state(XOF128_IV),
    }
  }
}

impl AsconXof128 {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  #[must_use]
  pub fn finalize_xof(&self) -> AsconXof128Xof {
    AsconXof128Xof::new(self.sponge.clone())
  }

  #[inline]
  pub fn hash_into(data: &[u8], out: &mut [u8]) {
    let mut h = Self::new();
    h.sponge.update(data);
    h.sponge.finish();
    h.sponge.read(out);
  }
}

impl HashProvider for AsconXof128 {
  const NAME: &'static str = "Ascon-XOF128";

  #[inline]
  fn init(&mut self) {
    *self = Self::default();
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

impl ExtendableOutput for AsconXof128 {
  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) {
    self.sponge.finish();
    self.sponge.read(out);
  }

  #[inline]
  fn is_squeezing(&self) -> bool {
    self.sponge.is_squeezing()
  }
}

impl Describe for AsconXof128 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "Ascon-XOF128",
    output: OutputKind::Extendable,
    sizes: SizeSet::Unbounded,
    default_size: 0,
    block_len: RATE,
    parameters: &[],
  };
}

/// Ascon-CXOF128: Ascon-XOF128 with a customization string of at most
/// [`CXOF_MAX_CUSTOMIZATION`] bytes.
///
/// The customization is absorbed once into a cached initial state; an empty
/// string still takes that path, so the output differs from Ascon-XOF128.
#[derive(Clone)]
pub struct AsconCxof128 {
  initial: [u64; 5],
  sponge: AsconSponge,
  customization: Vec<u8>,
  stale: bool,
}

impl Default for AsconCxof128 {
  fn default() -> Self {
    let mut h = Self {
      initial: CXOF128_IV,
      sponge: AsconSponge::with_state(CXOF128_IV),
      customization: Vec::new(),
      stale: true,
    };
    h.derive();
    h
  }
}

impl AsconCxof128 {
  /// # Errors
  ///
  /// [`HashError::InvalidParameterLength`] when `customization` is longer
  /// than [`CXOF_MAX_CUSTOMIZATION`] bytes.
  pub fn new(customization: &[u8]) -> Result<Self, HashError> {
    let mut h = Self::default();
    h.set_customization(customization)?;
    Ok(h)
  }

  fn derive(&mut self) {
    let mut sponge = AsconSponge::with_state(CXOF128_IV);
    sponge.update(&((self.customization.len() as u64) * 8).to_le_bytes());
    sponge.update(&self.customization);
    sponge.pad_block();
    self.initial = sponge.state;
    self.stale = false;
    self.sponge = AsconSponge::with_state(self.initial);
  }

  #[inline]
  #[must_use]
  pub fn finalize_xof(&self) -> AsconXof128Xof {
    AsconXof128Xof::new(self.sponge.clone())
  }

  /// # Errors
  ///
  /// Same as [`AsconCxof128::new`].
  pub fn hash_into(customization: &[u8], data: &[u8], out: &mut [u8]) -> Result<(), HashError> {
    let mut h = Self::new(customization)?;
    h.sponge.update(data);
    h.sponge.finish();
    h.sponge.read(out);
    Ok(())
  }
}

impl HashProvider for AsconCxof128 {
  const NAME: &'static str = "Ascon-CXOF128";

  fn init(&mut self) {
    if self.stale {
      self.derive();
    } else {
      self.sponge = AsconSponge::with_state(self.initial);
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    self.sponge.absorb(data)
  }

  fn clear(&mut self) {
    self.sponge.clear();
    self.initial.zeroize();
    self.customization.zeroize();
    self.stale = true;
  }
}

impl ExtendableOutput for AsconCxof128 {
  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) {
    self.sponge.finish();
    self.sponge.read(out);
  }

  #[inline]
  fn is_squeezing(&self) -> bool {
    self.sponge.is_squeezing()
  }
}

impl SetCustomization for AsconCxof128 {
  fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError> {
    Parameter::Customization {
      max_len: Some(CXOF_MAX_CUSTOMIZATION),
    }
    .check_len(customization.len())?;
    self.customization.zeroize();
    self.customization.extend_from_slice(customization);
    self.derive();
    Ok(())
  }
}

impl Describe for AsconCxof128 {
  const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
    name: "Ascon-CXOF128",
    output: OutputKind::Extendable,
    sizes: SizeSet::Unbounded,
    default_size: 0,
    block_len: RATE,
    parameters: &[Parameter::Customization {
      max_len: Some(CXOF_MAX_CUSTOMIZATION),
    }],
  };
}

/// Ascon-XOF128 / Ascon-CXOF128 reader.
#[derive(Clone)]
pub struct AsconXof128Xof {
  sponge: AsconSponge,
}

impl AsconXof128Xof {
  #[inline]
  fn new(mut sponge: AsconSponge) -> Self {
    sponge.finish();
    Self { sponge }
  }
}

impl Xof for AsconXof128Xof {
  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) {
    self.sponge.read(out);
  }
}
