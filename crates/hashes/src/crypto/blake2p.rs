//! BLAKE2bp and BLAKE2sp: 4 (resp. 8) BLAKE2 leaves over interleaved
//! blocks, combined by one root node.
//!
//! Input is consumed in 512-byte superblocks; leaf `i` takes the `i`-th
//! block of every superblock. Leaves are independent until finalization, so a
//! batch of superblocks can be hashed with one scoped thread per leaf (see
//! [`crate::config`]). Each leaf emits its full-width output into the root.

#![allow(clippy::indexing_slicing)] // Leaf lanes index fixed-size superblocks

use traits::{FixedOutput, HashError, HashProvider, SetKey, SetPersonalization, SetSalt, WithHashSize};
use zeroize::{Zeroize, Zeroizing};

use super::{blake2b, blake2s};
use crate::{
  absorb::BlockBuffer,
  config::{self, Blake2pConfig, Blake2pForce},
  introspect::{AlgorithmInfo, Describe, OutputKind},
};

const SUPERBLOCK: usize = 512;

macro_rules! blake2p {
  ($(#[$meta:meta])* $name:ident, $m:ident, $lanes:literal, $label:literal) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      leaves: [$m::Core; $lanes],
      root: $m::Core,
      buffer: BlockBuffer<SUPERBLOCK>,
      params: $m::Params,
      key: Zeroizing<[u8; $m::KEY_LEN]>,
      force: Option<Blake2pForce>,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::with_len($m::OUT_LEN)
      }
    }

    impl $name {
      const LEAF_BLOCK: usize = SUPERBLOCK / $lanes;

      fn with_len(len: usize) -> Self {
        let params = $m::Params::sequential(len);
        let mut h = Self {
          leaves: core::array::from_fn(|_| $m::Core::new(&params, &[], false)),
          root: $m::Core::new(&params, &[], true),
          buffer: BlockBuffer::new(),
          params,
          key: Zeroizing::new([0u8; $m::KEY_LEN]),
          force: None,
        };
        h.restart();
        h
      }

      /// # Errors
      ///
      /// [`HashError::UnsupportedSize`] for sizes the underlying BLAKE2
      /// variant rejects.
      pub fn new(bits: usize) -> Result<Self, HashError> {
        Ok(Self::with_len($m::SIZES.validate(bits)? / 8))
      }

      /// Override the process-wide leaf execution mode for this instance.
      pub fn set_force(&mut self, force: Blake2pForce) {
        self.force = Some(force);
      }

      /// Effective configuration for this instance.
      #[must_use]
      pub fn config(&self) -> Blake2pConfig {
        let mut cfg = config::get();
        if let Some(force) = self.force {
          cfg.requested_force = force;
          cfg.effective_force = config::clamp_force(force);
        }
        cfg
      }

      fn tree_params(&self) -> $m::Params {
        let mut p = self.params;
        p.fanout = $lanes;
        p.depth = 2;
        p.leaf_len = 0;
        p.inner_len = $m::OUT_LEN as u8;
        p
      }

      fn restart(&mut self) {
        let key = &self.key[..self.params.key_len as usize];
        let base = self.tree_params();
        self.leaves = core::array::from_fn(|i| {
          let mut p = base;
          p.node_offset = i as u64;
          p.node_depth = 0;
          $m::Core::new(&p, key, i == $lanes - 1)
        });
        let mut root = base;
        root.node_offset = 0;
        root.node_depth = 1;
        self.root = $m::Core::new(&root, &[], true);
        self.buffer.reset();
      }

      /// Feed whole superblocks to the leaves.
      fn transform(leaves: &mut [$m::Core; $lanes], blocks: &[u8], threaded: bool) {
        let lane = |i: usize, leaf: &mut $m::Core| {
          let (superblocks, _) = blocks.as_chunks::<SUPERBLOCK>();
          for sb in superblocks {
            leaf.update(&sb[i * Self::LEAF_BLOCK..(i + 1) * Self::LEAF_BLOCK]);
          }
        };

        #[cfg(feature = "std")]
        {
          if threaded {
            std::thread::scope(|s| {
              for (i, leaf) in leaves.iter_mut().enumerate() {
                s.spawn(move || lane(i, leaf));
              }
            });
            return;
          }
        }
        #[cfg(not(feature = "std"))]
        let _ = threaded;

        for (i, leaf) in leaves.iter_mut().enumerate() {
          lane(i, leaf);
        }
      }
    }

    impl HashProvider for $name {
      const NAME: &'static str = $label;

      #[inline]
      fn init(&mut self) {
        self.restart();
      }

      fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        let cfg = self.config();
        let leaves = &mut self.leaves;
        self.buffer.absorb(data, SUPERBLOCK, SUPERBLOCK, |blocks, _| {
          Self::transform(leaves, blocks, cfg.use_threads(blocks.len()));
        });
        Ok(())
      }

      fn clear(&mut self) {
        for leaf in &mut self.leaves {
          leaf.clear();
        }
        self.root.clear();
        self.buffer.zeroize();
        self.key.zeroize();
        self.params.clear();
      }
    }

    impl FixedOutput for $name {
      #[inline]
      fn hash_size(&self) -> usize {
        self.params.digest_len as usize * 8
      }

      fn finalize_into(&self, out: &mut [u8]) {
        let pending = self.buffer.pending();
        let mut root = self.root.clone();
        let mut cv = [0u8; $m::OUT_LEN];
        for (i, leaf) in self.leaves.iter().enumerate() {
          let mut leaf = leaf.clone();
          let start = i * Self::LEAF_BLOCK;
          if pending.len() > start {
            let end = core::cmp::min(pending.len(), start + Self::LEAF_BLOCK);
            leaf.update(&pending[start..end]);
          }
          leaf.finalize_into(&mut cv);
          root.update(&cv);
        }
        cv.zeroize();

        let n = core::cmp::min(out.len(), self.params.digest_len as usize);
        root.finalize_into(&mut out[..n]);
      }
    }

    impl WithHashSize for $name {
      #[inline]
      fn with_hash_size(bits: usize) -> Result<Self, HashError> {
        Self::new(bits)
      }
    }

    impl SetKey for $name {
      fn set_key(&mut self, key: &[u8]) -> Result<(), HashError> {
        $m::PARAMETERS[0].check_len(key.len())?;
        self.key.zeroize();
        self.key[..key.len()].copy_from_slice(key);
        self.params.key_len = key.len() as u8;
        self.restart();
        Ok(())
      }
    }

    impl SetSalt for $name {
      fn set_salt(&mut self, salt: &[u8]) -> Result<(), HashError> {
        $m::PARAMETERS[1].check_len(salt.len())?;
        self.params.salt.copy_from_slice(salt);
        self.restart();
        Ok(())
      }
    }

    impl SetPersonalization for $name {
      fn set_personalization(&mut self, personalization: &[u8]) -> Result<(), HashError> {
        $m::PARAMETERS[2].check_len(personalization.len())?;
        self.params.personal.copy_from_slice(personalization);
        self.restart();
        Ok(())
      }
    }

    impl Describe for $name {
      const INFO: &'static AlgorithmInfo = &AlgorithmInfo {
        name: $label,
        output: OutputKind::Fixed,
        sizes: $m::SIZES,
        default_size: $m::OUT_LEN * 8,
        block_len: SUPERBLOCK,
        parameters: $m::PARAMETERS,
      };
    }
  };
}

blake2p!(
  /// BLAKE2bp: four BLAKE2b leaves, 8..=512-bit digests.
  Blake2bp, blake2b, 4, "BLAKE2bp"
);
blake2p!(
  /// BLAKE2sp: eight BLAKE2s leaves, 8..=256-bit digests.
  Blake2sp, blake2s, 8, "BLAKE2sp"
);

#[cfg(test)]
mod tests {
  use alloc::{vec, vec::Vec};

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

  fn digest<H: FixedOutput>(h: &H) -> Vec<u8> {
    let mut out = vec![0u8; h.hash_size() / 8];
    h.finalize_into(&mut out);
    out
  }

  #[test]
  fn fox_vectors() {
    let mut bp = Blake2bp::new(256).unwrap();
    bp.update(FOX).unwrap();
    assert_eq!(
      hex(&digest(&bp)),
      "4184d2acbcce03adc3b8f2fccd1ae3d6ced3aa0b051ae648f6986bb46579a0cf"
    );

    let mut sp = Blake2sp::default();
    sp.update(FOX).unwrap();
    assert_eq!(
      hex(&digest(&sp)),
      "cf192976714bb648e72b29fa90e6bf0fbc5bf2efe7d5c26ed8ff34e855368691"
    );
  }

  #[test]
  fn threaded_matches_sequential() {
    let data: Vec<u8> = (0..70_000u32).map(|i| (i * 31) as u8).collect();
    for len in [0usize, 1, 511, 512, 513, 1024, 4097, 70_000] {
      let mut seq = Blake2bp::default();
      seq.set_force(Blake2pForce::Sequential);
      seq.update(&data[..len]).unwrap();

      let mut thr = Blake2bp::default();
      thr.set_force(Blake2pForce::Threaded);
      thr.update(&data[..len]).unwrap();
      assert_eq!(digest(&seq), digest(&thr), "bp len {len}");

      let mut seq = Blake2sp::default();
      seq.set_force(Blake2pForce::Sequential);
      seq.update(&data[..len]).unwrap();

      let mut thr = Blake2sp::default();
      thr.set_force(Blake2pForce::Threaded);
      thr.update(&data[..len]).unwrap();
      assert_eq!(digest(&seq), digest(&thr), "sp len {len}");
    }
  }

  #[test]
  fn streaming_matches_one_shot() {
    let data: Vec<u8> = (0..5000u32).map(|i| i as u8).collect();
    let mut one = Blake2sp::new(128).unwrap();
    one.update(&data).unwrap();

    let mut pieces = Blake2sp::new(128).unwrap();
    for piece in data.chunks(77) {
      pieces.update(piece).unwrap();
    }
    assert_eq!(digest(&one), digest(&pieces));
    assert_eq!(digest(&one).len(), 16);
  }

  #[test]
  fn keyed_and_cleared() {
    let mut keyed = Blake2bp::default();
    keyed.set_key(b"tree key").unwrap();
    keyed.set_salt(&[1u8; 16]).unwrap();
    keyed.update(FOX).unwrap();

    let mut plain = Blake2bp::default();
    plain.update(FOX).unwrap();
    assert_ne!(digest(&keyed), digest(&plain));

    keyed.clear();
    assert!(keyed.key.iter().all(|&b| b == 0));
    keyed.init();
    keyed.update(FOX).unwrap();
    assert_eq!(digest(&keyed), digest(&plain));

    assert!(Blake2sp::default().set_key(&[0u8; 33]).is_err());
    assert!(Blake2bp::new(520).is_err());
  }

  #[test]
  fn finalize_is_repeatable() {
    let mut h = Blake2bp::default();
    h.update(&[0xA5; 1000]).unwrap();
    let first = digest(&h);
    assert_eq!(digest(&h), first);
    h.update(b"more").unwrap();
    assert_ne!(digest(&h), first);
  }
}
