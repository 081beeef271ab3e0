//! Keccak-p[1600, n_r] permutation and the generic sponge state machine.
//!
//! Everything Keccak-derived in this crate (SHA-3, SHAKE, cSHAKE, KMAC,
//! TurboSHAKE, KangarooTwelve) is a [`KeccakSponge`] with a different rate,
//! round count and domain-separation suffix.

#![allow(clippy::indexing_slicing)] // Keccak state is fixed-size; indexing is audited

use traits::{HashError, Xof};
use zeroize::Zeroize;

use crate::absorb::BlockBuffer;

pub(crate) const KECCAKF_ROUNDS: usize = 24;

// Round constants.
const RC: [u64; KECCAKF_ROUNDS] = [
  0x0000_0000_0000_0001,
  0x0000_0000_0000_8082,
  0x8000_0000_0000_808a,
  0x8000_0000_8000_8000,
  0x0000_0000_0000_808b,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8009,
  0x0000_0000_0000_008a,
  0x0000_0000_0000_0088,
  0x0000_0000_8000_8009,
  0x0000_0000_8000_000a,
  0x0000_0000_8000_808b,
  0x8000_0000_0000_008b,
  0x8000_0000_0000_8089,
  0x8000_0000_0000_8003,
  0x8000_0000_0000_8002,
  0x8000_0000_0000_0080,
  0x0000_0000_0000_800a,
  0x8000_0000_8000_000a,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8080,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8008,
];

/// Apply the last `rounds` rounds of Keccak-f[1600] to `state`.
///
/// `rounds == 24` is Keccak-f[1600]; KangarooTwelve and TurboSHAKE use 12,
/// MarsupilamiFourteen 14.
#[inline(always)]
pub(crate) fn keccak_p1600(state: &mut [u64; 25], rounds: usize) {
  debug_assert!(rounds <= KECCAKF_ROUNDS);

  let mut a0 = state[0];
  let mut a1 = state[1];
  let mut a2 = state[2];
  let mut a3 = state[3];
  let mut a4 = state[4];
  let mut a5 = state[5];
  let mut a6 = state[6];
  let mut a7 = state[7];
  let mut a8 = state[8];
  let mut a9 = state[9];
  let mut a10 = state[10];
  let mut a11 = state[11];
  let mut a12 = state[12];
  let mut a13 = state[13];
  let mut a14 = state[14];
  let mut a15 = state[15];
  let mut a16 = state[16];
  let mut a17 = state[17];
  let mut a18 = state[18];
  let mut a19 = state[19];
  let mut a20 = state[20];
  let mut a21 = state[21];
  let mut a22 = state[22];
  let mut a23 = state[23];
  let mut a24 = state[24];

  macro_rules! round {
    ($rc:expr) => {{
      // θ
      let c0 = a0 ^ a5 ^ a10 ^ a15 ^ a20;
      let c1 = a1 ^ a6 ^ a11 ^ a16 ^ a21;
      let c2 = a2 ^ a7 ^ a12 ^ a17 ^ a22;
      let c3 = a3 ^ a8 ^ a13 ^ a18 ^ a23;
      let c4 = a4 ^ a9 ^ a14 ^ a19 ^ a24;

      let d0 = c4 ^ c1.rotate_left(1);
      let d1 = c0 ^ c2.rotate_left(1);
      let d2 = c1 ^ c3.rotate_left(1);
      let d3 = c2 ^ c4.rotate_left(1);
      let d4 = c3 ^ c0.rotate_left(1);

      a0 ^= d0;
      a5 ^= d0;
      a10 ^= d0;
      a15 ^= d0;
      a20 ^= d0;

      a1 ^= d1;
      a6 ^= d1;
      a11 ^= d1;
      a16 ^= d1;
      a21 ^= d1;

      a2 ^= d2;
      a7 ^= d2;
      a12 ^= d2;
      a17 ^= d2;
      a22 ^= d2;

      a3 ^= d3;
      a8 ^= d3;
      a13 ^= d3;
      a18 ^= d3;
      a23 ^= d3;

      a4 ^= d4;
      a9 ^= d4;
      a14 ^= d4;
      a19 ^= d4;
      a24 ^= d4;

      // ρ + π
      let b0 = a0;
      let b10 = a1.rotate_left(1);
      let b20 = a2.rotate_left(62);
      let b5 = a3.rotate_left(28);
      let b15 = a4.rotate_left(27);

      let b16 = a5.rotate_left(36);
      let b1 = a6.rotate_left(44);
      let b11 = a7.rotate_left(6);
      let b21 = a8.rotate_left(55);
      let b6 = a9.rotate_left(20);

      let b7 = a10.rotate_left(3);
      let b17 = a11.rotate_left(10);
      let b2 = a12.rotate_left(43);
      let b12 = a13.rotate_left(25);
      let b22 = a14.rotate_left(39);

      let b23 = a15.rotate_left(41);
      let b8 = a16.rotate_left(45);
      let b18 = a17.rotate_left(15);
      let b3 = a18.rotate_left(21);
      let b13 = a19.rotate_left(8);

      let b14 = a20.rotate_left(18);
      let b24 = a21.rotate_left(2);
      let b9 = a22.rotate_left(61);
      let b19 = a23.rotate_left(56);
      let b4 = a24.rotate_left(14);

      // χ
      a0 = b0 ^ ((!b1) & b2);
      a1 = b1 ^ ((!b2) & b3);
      a2 = b2 ^ ((!b3) & b4);
      a3 = b3 ^ ((!b4) & b0);
      a4 = b4 ^ ((!b0) & b1);

      a5 = b5 ^ ((!b6) & b7);
      a6 = b6 ^ ((!b7) & b8);
      a7 = b7 ^ ((!b8) & b9);
      a8 = b8 ^ ((!b9) & b5);
      a9 = b9 ^ ((!b5) & b6);

      a10 = b10 ^ ((!b11) & b12);
      a11 = b11 ^ ((!b12) & b13);
      a12 = b12 ^ ((!b13) & b14);
      a13 = b13 ^ ((!b14) & b10);
      a14 = b14 ^ ((!b10) & b11);

      a15 = b15 ^ ((!b16) & b17);
      a16 = b16 ^ ((!b17) & b18);
      a17 = b17 ^ ((!b18) & b19);
      a18 = b18 ^ ((!b19) & b15);
      a19 = b19 ^ ((!b15) & b16);

      a20 = b20 ^ ((!b21) & b22);
      a21 = b21 ^ ((!b22) & b23);
      a22 = b22 ^ ((!b23) & b24);
      a23 = b23 ^ ((!b24) & b20);
      a24 = b24 ^ ((!b20) & b21);

      // ι
      a0 ^= $rc;
    }};
  }

  for &rc in &RC[KECCAKF_ROUNDS - rounds..] {
    round!(rc);
  }

  state[0] = a0;
  state[1] = a1;
  state[2] = a2;
  state[3] = a3;
  state[4] = a4;
  state[5] = a5;
  state[6] = a6;
  state[7] = a7;
  state[8] = a8;
  state[9] = a9;
  state[10] = a10;
  state[11] = a11;
  state[12] = a12;
  state[13] = a13;
  state[14] = a14;
  state[15] = a15;
  state[16] = a16;
  state[17] = a17;
  state[18] = a18;
  state[19] = a19;
  state[20] = a20;
  state[21] = a21;
  state[22] = a22;
  state[23] = a23;
  state[24] = a24;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
  Absorbing,
  /// Offset of the next unread byte in the output window.
  Squeezing(usize),
}

/// Keccak sponge with a `RATE`-byte rate and `ROUNDS`-round permutation.
///
/// The block buffer holds pending input while absorbing and becomes the
/// output window (the serialized rate lanes) once squeezing starts. Lanes are
/// converted to and from bytes explicitly in little-endian order.
#[derive(Clone)]
pub(crate) struct KeccakSponge<const RATE: usize, const ROUNDS: usize = KECCAKF_ROUNDS> {
  state: [u64; 25],
  buffer: BlockBuffer<RATE>,
  phase: Phase,
}

impl<const RATE: usize, const ROUNDS: usize> Default for KeccakSponge<RATE, ROUNDS> {
  #[inline]
  fn default() -> Self {
    Self {
      state: [0u64; 25],
      buffer: BlockBuffer::new(),
      phase: Phase::Absorbing,
    }
  }
}

impl<const RATE: usize, const ROUNDS: usize> KeccakSponge<RATE, ROUNDS> {
  #[inline(always)]
  fn absorb_blocks(state: &mut [u64; 25], blocks: &[u8]) {
    debug_assert_eq!(RATE % 8, 0);
    let (blocks, _) = blocks.as_chunks::<RATE>();
    for block in blocks {
      let (lanes, _) = block.as_chunks::<8>();
      for (lane, bytes) in state.iter_mut().zip(lanes) {
        *lane ^= u64::from_le_bytes(*bytes);
      }
      keccak_p1600(state, ROUNDS);
    }
  }

  #[inline(always)]
  fn fill_window(&mut self) {
    let (window, _) = self.buffer.bytes_mut().as_chunks_mut::<8>();
    for (bytes, lane) in window.iter_mut().zip(self.state.iter()) {
      *bytes = lane.to_le_bytes();
    }
  }

  /// Back to the all-zero initial state, keeping nothing.
  #[inline]
  pub(crate) fn reset(&mut self) {
    self.state = [0u64; 25];
    self.buffer.reset();
    self.phase = Phase::Absorbing;
  }

  #[inline]
  pub(crate) const fn is_squeezing(&self) -> bool {
    matches!(self.phase, Phase::Squeezing(_))
  }

  /// Bytes absorbed since the last reset.
  #[inline]
  pub(crate) const fn absorbed(&self) -> u64 {
    self.buffer.total()
  }

  /// Absorb input that the caller knows arrives before any squeeze: encoded
  /// prefixes, chaining values, and sized digests that only finalize copies.
  #[inline]
  pub(crate) fn update(&mut self, data: &[u8]) {
    debug_assert!(!self.is_squeezing());
    let state = &mut self.state;
    self
      .buffer
      .absorb(data, RATE, RATE, |blocks, _| Self::absorb_blocks(state, blocks));
  }

  /// Absorb user input.
  ///
  /// # Errors
  ///
  /// [`HashError::MisusedSession`] once squeezing has started.
  #[inline]
  pub(crate) fn absorb(&mut self, data: &[u8]) -> Result<(), HashError> {
    if self.is_squeezing() {
      return Err(HashError::MisusedSession);
    }
    self.update(data);
    Ok(())
  }

  /// Zero-pad the pending bytes to a block boundary and absorb that block.
  ///
  /// This is `bytepad` for encoded prefixes; a no-op when already aligned.
  pub(crate) fn pad_zeroes(&mut self) {
    if self.buffer.position() != 0 {
      let zeroes = [0u8; RATE];
      let fill = RATE - self.buffer.position();
      self.update(&zeroes[..fill]);
    }
  }

  /// Absorbing -> squeezing: `pad10*1` with `suffix` carrying the domain
  /// separation bits, one final permutation, output window filled.
  ///
  /// A no-op once squeezing.
  pub(crate) fn finish(&mut self, suffix: u8) {
    if self.is_squeezing() {
      return;
    }
    let pos = self.buffer.position();
    let block = self.buffer.padded_block(RATE);
    block[pos] ^= suffix;
    block[RATE - 1] ^= 0x80;
    Self::absorb_blocks(&mut self.state, self.buffer.bytes());
    self.fill_window();
    self.phase = Phase::Squeezing(0);
  }

  /// Emit output, finishing with `suffix` first if still absorbing.
  #[inline]
  pub(crate) fn squeeze(&mut self, suffix: u8, out: &mut [u8]) {
    self.finish(suffix);
    self.read(out);
  }

  /// Continue the output stream of an already finished sponge.
  pub(crate) fn read(&mut self, mut out: &mut [u8]) {
    let Phase::Squeezing(mut offset) = self.phase else {
      debug_assert!(false, "read before finish");
      return;
    };

    while !out.is_empty() {
      if offset == RATE {
        keccak_p1600(&mut self.state, ROUNDS);
        self.fill_window();
        offset = 0;
      }

      let take = core::cmp::min(RATE - offset, out.len());
      out[..take].copy_from_slice(&self.buffer.bytes()[offset..offset + take]);
      offset += take;
      out = &mut out[take..];
    }

    self.phase = Phase::Squeezing(offset);
  }

  /// Wipe state and buffer. The sponge is left in the all-zero initial state.
  pub(crate) fn clear(&mut self) {
    self.state.zeroize();
    self.buffer.zeroize();
    self.phase = Phase::Absorbing;
  }

  #[cfg(test)]
  pub(crate) fn is_zeroed(&self) -> bool {
    self.state.iter().all(|&lane| lane == 0) && self.buffer.bytes().iter().all(|&b| b == 0)
  }
}

impl<const RATE: usize, const ROUNDS: usize> Drop for KeccakSponge<RATE, ROUNDS> {
  fn drop(&mut self) {
    self.clear();
  }
}

/// Output reader over a finished Keccak sponge.
///
/// Returned by `finalize_xof` on every Keccak-based XOF; the provider that
/// produced it keeps absorbing independently.
#[derive(Clone)]
pub struct KeccakXof<const RATE: usize, const ROUNDS: usize = KECCAKF_ROUNDS> {
  sponge: KeccakSponge<RATE, ROUNDS>,
}

impl<const RATE: usize, const ROUNDS: usize> KeccakXof<RATE, ROUNDS> {
  #[inline]
  pub(crate) fn new(mut sponge: KeccakSponge<RATE, ROUNDS>, suffix: u8) -> Self {
    sponge.finish(suffix);
    Self { sponge }
  }
}

impl<const RATE: usize, const ROUNDS: usize> Xof for KeccakXof<RATE, ROUNDS> {
  #[inline]
  fn squeeze(&mut self, out: &mut [u8]) {
    self.sponge.read(out);
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  #[test]
  fn keccak_f1600_zero_state() {
    let mut state = [0u64; 25];
    keccak_p1600(&mut state, KECCAKF_ROUNDS);
    assert_eq!(state[0], 0xF125_8F79_40E1_DDE7);
    assert_eq!(state[1], 0x84D5_CCF9_33C0_478A);
    assert_eq!(state[24], 0xEAF1_FF7B_5CEC_A249);
  }

  #[test]
  fn reduced_rounds_differ_from_full() {
    let mut full = [0u64; 25];
    let mut twelve = [0u64; 25];
    keccak_p1600(&mut full, 24);
    keccak_p1600(&mut twelve, 12);
    assert_ne!(full, twelve);

    let mut none = [7u64; 25];
    keccak_p1600(&mut none, 0);
    assert_eq!(none, [7u64; 25]);
  }

  #[test]
  fn absorb_after_squeeze_is_rejected() {
    let mut sponge = KeccakSponge::<168>::default();
    assert!(sponge.absorb(b"abc").is_ok());
    let mut out = [0u8; 4];
    sponge.squeeze(0x1F, &mut out);
    assert_eq!(sponge.absorb(b"d"), Err(HashError::MisusedSession));
  }

  #[test]
  fn squeeze_crosses_window_boundaries() {
    let mut once = KeccakSponge::<136>::default();
    once.update(b"window");
    let mut expected = [0u8; 500];
    once.squeeze(0x1F, &mut expected);

    let mut stepped = KeccakSponge::<136>::default();
    stepped.update(b"window");
    let mut got = Vec::new();
    for step in [1usize, 135, 1, 136, 7, 220] {
      let mut part = [0u8; 220];
      stepped.squeeze(0x1F, &mut part[..step]);
      got.extend_from_slice(&part[..step]);
    }
    assert_eq!(got.as_slice(), &expected[..]);
  }

  #[test]
  fn pad_zeroes_aligns_to_rate() {
    let mut sponge = KeccakSponge::<168>::default();
    sponge.update(&[1, 2, 3]);
    sponge.pad_zeroes();
    assert_eq!(sponge.absorbed(), 168);
    sponge.pad_zeroes();
    assert_eq!(sponge.absorbed(), 168);
  }

  #[test]
  fn clear_zeroes_everything() {
    let mut sponge = KeccakSponge::<168>::default();
    sponge.update(b"some secret material");
    let mut out = [0u8; 200];
    sponge.squeeze(0x1F, &mut out);
    sponge.clear();
    assert!(sponge.is_zeroed());
    assert!(!sponge.is_squeezing());
  }
}
