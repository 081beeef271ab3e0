//! TurboSHAKE and the KangarooTwelve tree hashes (RFC 9861).
//!
//! Both run Keccak-p[1600] with 12 rounds (14 for MarsupilamiFourteen).
//! KangarooTwelve splits `M || C || length_encode(|C|)` into 8 KiB chunks:
//! one chunk is hashed as a single node; more chunks make the first chunk the
//! head of a final node that absorbs one chaining value per further chunk.
//! Leaves are streamed, so memory use is independent of input length.

#![allow(clippy::indexing_slicing)] // Fixed-size encoding buffers + audited indexing

use alloc::vec::Vec;

use traits::{ExtendableOutput, HashError, HashProvider, SetCustomization};
use zeroize::Zeroize;

use super::{
  keccak::{KeccakSponge, KeccakXof},
  sha3::DS_SHAKE,
};
use crate::introspect::{AlgorithmInfo, Describe, OutputKind, Parameter, SizeSet};

const REDUCED_ROUNDS: usize = 12;
const CHUNK_LEN: usize = 8192;

const DS_SINGLE_NODE: u8 = 0x07;
const DS_LEAF: u8 = 0x0B;
const DS_FINAL_NODE: u8 = 0x06;

/// Follows the first chunk once the input turns out to need a tree.
const TREE_MARKER: [u8; 8] = [0x03, 0, 0, 0, 0, 0, 0, 0];
const FINAL_TRAILER: [u8; 2] = [0xFF, 0xFF];

/// Big-endian `x` without leading zero bytes, then the byte count.
/// `length_encode(0)` is the single byte `0x00`.
#[inline(always)]
fn length_encode(x: u64, b: &mut [u8; 9]) -> &[u8] {
  let n = (64 - x.leading_zeros() as usize).div_ceil(8);
  b[..8].copy_from_slice(&x.to_be_bytes());
  b[8] = n as u8;
  &b[8 - n..]
}

macro_rules! turboshake {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      sponge: KeccakSponge<$rate, REDUCED_ROUNDS>,
      domain: u8,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self {
          sponge: KeccakSponge::default(),
          domain: DS_SHAKE,
        }
      }
    }

    impl $name {
      /// TurboSHAKE with the default domain byte `0x1F`.
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self::default()
      }

      /// TurboSHAKE with a caller-chosen domain byte.
      ///
      /// # Errors
      ///
      /// [`HashError::InvalidParameter`] unless `domain` is in `0x01..=0x7F`.
      pub fn with_domain(domain: u8) -> Result<Self, HashError> {
        if !(0x01..=0x7F).contains(&domain) {
          return Err(HashError::InvalidParameter { parameter: "domain" });
        }
        Ok(Self {
          sponge: KeccakSponge::default(),
          domain,
        })
      }

      #[inline]
      #[must_use]
      pub fn domain(&self) -> u8 {
        self.domain
      }

      #[inline]
      #[must_use]
      pub fn finalize_xof(&self) -> KeccakXof<$rate, REDUCED_ROUNDS> {
        KeccakXof::new(self.sponge.clone(), self.domain)
      }

      #[inline]
      pub fn hash_into(data: &[u8], out: &mut [u8]) {
        let mut h = Self::new();
        h.sponge.update(data);
        h.sponge.squeeze(h.domain, out);
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
        self.sponge.squeeze(self.domain, out);
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
        parameters: &[Parameter::Domain],
      };
    }
  };
}

turboshake!(
  /// TurboSHAKE128: 12-round SHAKE128 with a selectable domain byte.
  TurboShake128, 168, "TurboSHAKE128"
);
turboshake!(
  /// TurboSHAKE256: 12-round SHAKE256 with a selectable domain byte.
  TurboShake256, 136, "TurboSHAKE256"
);

/// Streaming tree state shared by KT128, KT256 and M14.
///
/// `chunk_len` counts bytes of the chunk currently being filled: the first
/// chunk goes straight into `root`, later ones into `leaf`.
#[derive(Clone)]
struct Tree<const RATE: usize, const ROUNDS: usize, const CV: usize> {
  root: KeccakSponge<RATE, ROUNDS>,
  leaf: KeccakSponge<RATE, ROUNDS>,
  chunk_len: usize,
  leaves: u64,
  in_tree: bool,
  customization: Vec<u8>,
}

impl<const RATE: usize, const ROUNDS: usize, const CV: usize> Default for Tree<RATE, ROUNDS, CV> {
  #[inline]
  fn default() -> Self {
    Self {
      root: KeccakSponge::default(),
      leaf: KeccakSponge::default(),
      chunk_len: 0,
      leaves: 0,
      in_tree: false,
      customization: Vec::new(),
    }
  }
}

impl<const RATE: usize, const ROUNDS: usize, const CV: usize> Tree<RATE, ROUNDS, CV> {
  fn restart(&mut self) {
    self.root.reset();
    self.leaf.reset();
    self.chunk_len = 0;
    self.leaves = 0;
    self.in_tree = false;
  }

  fn feed(&mut self, mut data: &[u8]) {
    while !data.is_empty() {
      if self.chunk_len == CHUNK_LEN {
        self.close_chunk();
      }

      let take = core::cmp::min(CHUNK_LEN - self.chunk_len, data.len());
      if self.in_tree {
        self.leaf.update(&data[..take]);
      } else {
        self.root.update(&data[..take]);
      }
      self.chunk_len += take;
      data = &data[take..];
    }
  }

  /// A full chunk is followed by more input: turn the single node into a
  /// tree, or retire the current leaf.
  fn close_chunk(&mut self) {
    if self.in_tree {
      self.finish_leaf();
    } else {
      self.root.update(&TREE_MARKER);
      self.in_tree = true;
    }
    self.chunk_len = 0;
  }

  fn finish_leaf(&mut self) {
    let mut cv = [0u8; CV];
    self.leaf.squeeze(DS_LEAF, &mut cv);
    self.root.update(&cv);
    cv.zeroize();
    self.leaf.reset();
    self.leaves += 1;
  }

  /// Append the customization suffix and pad the final node.
  fn finish(&mut self) {
    if self.root.is_squeezing() {
      return;
    }

    let customization = core::mem::take(&mut self.customization);
    self.feed(&customization);
    let mut b = [0u8; 9];
    self.feed(length_encode(customization.len() as u64, &mut b));
    self.customization = customization;

    if self.in_tree {
      self.finish_leaf();
      self.root.update(length_encode(self.leaves, &mut b));
      self.root.update(&FINAL_TRAILER);
      self.root.finish(DS_FINAL_NODE);
    } else {
      self.root.finish(DS_SINGLE_NODE);
    }
  }

  fn clear(&mut self) {
    self.root.clear();
    self.leaf.clear();
    self.customization.zeroize();
    self.chunk_len = 0;
    self.leaves = 0;
    self.in_tree = false;
  }
}

macro_rules! kangaroo {
  ($(#[$meta:meta])* $name:ident, $rate:literal, $rounds:expr, $cv:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone, Default)]
    pub struct $name {
      tree: Tree<$rate, { $rounds }, $cv>,
    }

    impl $name {
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self::default()
      }

      #[must_use]
      pub fn with_customization(customization: &[u8]) -> Self {
        let mut h = Self::default();
        h.tree.customization.extend_from_slice(customization);
        h
      }

      /// Reader over the output of everything absorbed so far. `self` is
      /// left absorbing.
      #[must_use]
      pub fn finalize_xof(&self) -> KeccakXof<$rate, { $rounds }> {
        let mut tree = self.tree.clone();
        tree.finish();
        KeccakXof::new(tree.root.clone(), DS_FINAL_NODE)
      }

      pub fn hash_into(customization: &[u8], data: &[u8], out: &mut [u8]) {
        let mut h = Self::with_customization(customization);
        h.tree.feed(data);
        h.tree.finish();
        h.tree.root.read(out);
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        self.tree.restart();
      }

      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.tree.root.is_squeezing() {
          return Err(HashError::MisusedSession);
        }
        self.tree.feed(data);
        Ok(())
      }

      #[inline]
      fn clear(&mut self) {
        self.tree.clear();
      }
    }

    impl ExtendableOutput for $name {
      #[inline]
      fn squeeze(&mut self, out: &mut [u8]) {
        self.tree.finish();
        self.tree.root.read(out);
      }

      #[inline]
      fn is_squeezing(&self) -> bool {
        self.tree.root.is_squeezing()
      }
    }

    impl SetCustomization for $name {
      fn set_customization(&mut self, customization: &[u8]) -> Result<(), HashError> {
        self.tree.customization.zeroize();
        self.tree.customization.extend_from_slice(customization);
        self.tree.restart();
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
        parameters: &[Parameter::Customization { max_len: None }],
      };
    }
  };
}

kangaroo!(
  /// KT128 (KangarooTwelve): TurboSHAKE128-based tree hash with 32-byte
  /// chaining values.
  Kt128, 168, REDUCED_ROUNDS, 32, "KT128"
);
kangaroo!(
  /// KT256: TurboSHAKE256-based tree hash with 64-byte chaining values.
  Kt256, 136, REDUCED_ROUNDS, 64, "KT256"
);
kangaroo!(
  /// MarsupilamiFourteen: KT256 geometry with 14-round Keccak-p.
  M14, 136, 14, 64, "M14"
);

/// KangarooTwelve, the original name of KT128.
pub type K12 = Kt128;
