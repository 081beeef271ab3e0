//! Byte-block buffering engine shared by every provider.
//!
//! Input arrives in arbitrary pieces; transforms want whole blocks. The engine
//! accumulates a partial block in a fixed buffer and hands complete blocks to a
//! transform callback, batching runs of aligned input straight from the
//! caller's slice without copying.
//!
//! Two thresholds drive it: `block` (the transform's block length) and
//! `trigger` (how many buffered-plus-incoming bytes force a flush). Sponges use
//! `trigger == block`. HAIFA-style compressions that must flag the final block
//! (BLAKE2) use `trigger == block + 1`, which keeps the last full block
//! buffered until more input proves it is not the last.

#![allow(clippy::indexing_slicing)] // `pos <= block <= CAP` is maintained by every path

use zeroize::Zeroize;

/// Fixed-capacity block buffer with a running byte counter.
#[derive(Clone)]
pub(crate) struct BlockBuffer<const CAP: usize> {
  buf: [u8; CAP],
  pos: usize,
  total: u64,
}

impl<const CAP: usize> Default for BlockBuffer<CAP> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<const CAP: usize> BlockBuffer<CAP> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      buf: [0u8; CAP],
      pos: 0,
      total: 0,
    }
  }

  /// Feed `data`, invoking `transform(blocks, n)` with `n * block` contiguous
  /// bytes whenever whole blocks are ready.
  ///
  /// Requires `block <= CAP` and `block <= trigger <= block + 1`.
  pub(crate) fn absorb<F>(&mut self, mut data: &[u8], block: usize, trigger: usize, mut transform: F)
  where
    F: FnMut(&[u8], usize),
  {
    debug_assert!(block <= CAP && block <= trigger && trigger <= block + 1);

    if self.pos != 0 && self.pos + data.len() >= trigger {
      let fill = block - self.pos;
      self.buf[self.pos..block].copy_from_slice(&data[..fill]);
      transform(&self.buf[..block], 1);
      data = &data[fill..];
      self.total += block as u64;
      self.pos = 0;
    }

    if data.len() >= trigger {
      let blocks = (data.len() + block - trigger) / block;
      let bytes = blocks * block;
      transform(&data[..bytes], blocks);
      data = &data[bytes..];
      self.total += bytes as u64;
    }

    self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
    self.pos += data.len();
  }

  /// Bytes buffered but not yet transformed.
  #[inline]
  pub(crate) fn pending(&self) -> &[u8] {
    &self.buf[..self.pos]
  }

  #[inline]
  pub(crate) const fn position(&self) -> usize {
    self.pos
  }

  /// Total bytes absorbed so far, buffered tail included.
  #[inline]
  pub(crate) const fn total(&self) -> u64 {
    self.total + self.pos as u64
  }

  /// Zero everything from `position()` up to `len` and return the first
  /// `len` bytes: the final block ready for padding.
  #[inline]
  pub(crate) fn padded_block(&mut self, len: usize) -> &mut [u8] {
    self.buf[self.pos..len].fill(0);
    &mut self.buf[..len]
  }

  /// Raw access to the whole buffer. Sponges reuse it as the output window
  /// once absorbing is over.
  #[inline]
  pub(crate) fn bytes_mut(&mut self) -> &mut [u8; CAP] {
    &mut self.buf
  }

  #[inline]
  pub(crate) fn bytes(&self) -> &[u8; CAP] {
    &self.buf
  }

  /// Forget buffered input without wiping it.
  #[inline]
  pub(crate) fn reset(&mut self) {
    self.pos = 0;
    self.total = 0;
  }
}

impl<const CAP: usize> Zeroize for BlockBuffer<CAP> {
  fn zeroize(&mut self) {
    self.buf.zeroize();
    self.pos = 0;
    self.total = 0;
  }
}
