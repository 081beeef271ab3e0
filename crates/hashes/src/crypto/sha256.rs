//! SHA-224 and SHA-256 (FIPS 180-4).

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + compression schedule

use traits::Digest;
use zeroize::Zeroize;

use crate::{
  absorb::BlockBuffer,
  introspect::{AlgorithmInfo, Describe, OutputKind, SizeSet},
};

const BLOCK_LEN: usize = 64;
const LEN_OFFSET: usize = BLOCK_LEN - 8;

const SHA256_H0: [u32; 8] = [
  0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SHA224_H0: [u32; 8] = [
  0xc105_9ed8,
  0x367c_d507,
  0x3070_dd17,
  0xf70e_5939,
  0xffc0_0b31,
  0x6858_1511,
  0x64f9_8fa7,
  0xbefa_4fa4,
];

const K: [u32; 64] = [
  0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5, 0xd807aa98,
  0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
  0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8,
  0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
  0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819,
  0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
  0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
  0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
  x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
  x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
  x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
  x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Compress every whole block in `blocks`.
fn compress(state: &mut [u32; 8], blocks: &[u8]) {
  let (blocks, _) = blocks.as_chunks::<BLOCK_LEN>();
  for block in blocks {
    // 16-word ring buffer message schedule.
    let mut w = [0u32; 16];
    for (wi, c) in w.iter_mut().zip(block.as_chunks::<4>().0) {
      *wi = u32::from_be_bytes(*c);
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

/// Merkle-Damgard state shared by SHA-224 and SHA-256.
#[derive(Clone)]
struct Core {
  state: [u32; 8],
  buffer: BlockBuffer<BLOCK_LEN>,
}

impl Core {
  #[inline]
  const fn new(iv: [u32; 8]) -> Self {
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

  /// Pad with `0x80`, zeros and the 64-bit message length; write the first
  /// `out.len()` bytes of the big-endian state.
  fn finalize_into(&self, out: &mut [u8]) {
    let mut state = self.state;
    let mut buffer = self.buffer.clone();
    let bit_len = buffer.total().wrapping_mul(8);
    let pos = buffer.position();

    let block = buffer.padded_block(BLOCK_LEN);
    block[pos] = 0x80;
    if pos >= LEN_OFFSET {
      compress(&mut state, block);
      block.fill(0);
    }
    block[LEN_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
    compress(&mut state, block);

    for (dst, word) in out.chunks_mut(4).zip(state) {
      dst.copy_from_slice(&word.to_be_bytes()[..dst.len()]);
    }
    buffer.zeroize();
  }

  fn clear(&mut self) {
    self.state.zeroize();
    self.buffer.zeroize();
  }
}

macro_rules! sha256_family {
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

sha256_family!(
  /// SHA-256.
  Sha256, SHA256_H0, 32, "SHA-256"
);
sha256_family!(
  /// SHA-224: SHA-256 with its own IV, truncated to 28 bytes.
  Sha224, SHA224_H0, 28, "SHA-224"
);
