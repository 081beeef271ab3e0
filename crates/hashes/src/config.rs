//! BLAKE2bp/BLAKE2sp runtime configuration (overrides + thresholds).
//!
//! The tree-parallel BLAKE2 variants can hash their leaf lanes on scoped
//! worker threads. This module decides when:
//! - a minimum batch size below which spawning threads is not worth it
//! - an optional forced mode (`auto`, `sequential`, `threaded`)
//!
//! Forced modes are clamped to what the build supports: without `std` there
//! are no threads and every mode resolves to [`Blake2pForce::Sequential`].

/// Forced leaf-lane execution mode for BLAKE2bp/BLAKE2sp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Blake2pForce {
  /// Thread when a batch reaches `min_parallel_bytes`.
  #[default]
  Auto,
  /// Hash leaves one after another on the calling thread.
  Sequential,
  /// Always fan leaves out to scoped threads (`std` only).
  Threaded,
}

impl Blake2pForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Sequential => "sequential",
      Self::Threaded => "threaded",
    }
  }
}

/// BLAKE2bp/BLAKE2sp selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blake2pTunables {
  /// Smallest batch of whole 512-byte superblocks (in bytes) handed to
  /// worker threads in `Auto` mode.
  pub min_parallel_bytes: usize,
}

/// Full BLAKE2bp/BLAKE2sp runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blake2pConfig {
  /// Requested force mode (env/programmatic).
  pub requested_force: Blake2pForce,
  /// Force mode clamped to build capabilities.
  pub effective_force: Blake2pForce,
  /// Thresholds used by the selector.
  pub tunables: Blake2pTunables,
}

impl Blake2pConfig {
  /// Whether a batch of `len` bytes goes to worker threads.
  #[inline]
  #[must_use]
  pub const fn use_threads(&self, len: usize) -> bool {
    match self.effective_force {
      Blake2pForce::Sequential => false,
      Blake2pForce::Threaded => true,
      Blake2pForce::Auto => len >= self.tunables.min_parallel_bytes,
    }
  }
}

/// Default `min_parallel_bytes`: 16 KiB per batch, 4 KiB per BLAKE2bp leaf.
pub const DEFAULT_MIN_PARALLEL_BYTES: usize = 16 * 1024;

/// Smallest accepted `min_parallel_bytes` override: one superblock.
const MIN_PARALLEL_FLOOR: usize = 512;

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Blake2pForce,
  min_parallel_bytes: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn parse_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    value.parse::<usize>().ok()
  }

  fn parse_force(name: &str) -> Option<Blake2pForce> {
    let value = std::env::var(name).ok()?;
    parse_force_value(&value)
  }

  Overrides {
    force: parse_force("HASHKIT_BLAKE2P_FORCE").unwrap_or(Blake2pForce::Auto),
    min_parallel_bytes: parse_usize("HASHKIT_BLAKE2P_MIN_PARALLEL_BYTES"),
  }
}

#[cfg_attr(not(feature = "std"), allow(dead_code))]
fn parse_force_value(value: &str) -> Option<Blake2pForce> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }

  if value.eq_ignore_ascii_case("auto") {
    return Some(Blake2pForce::Auto);
  }
  if value.eq_ignore_ascii_case("sequential")
    || value.eq_ignore_ascii_case("portable")
    || value.eq_ignore_ascii_case("off")
  {
    return Some(Blake2pForce::Sequential);
  }
  if value.eq_ignore_ascii_case("threaded") || value.eq_ignore_ascii_case("threads") || value.eq_ignore_ascii_case("on")
  {
    return Some(Blake2pForce::Threaded);
  }

  None
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
pub(crate) const fn clamp_force(requested: Blake2pForce) -> Blake2pForce {
  if cfg!(feature = "std") {
    requested
  } else {
    Blake2pForce::Sequential
  }
}

fn resolve(ov: Overrides) -> Blake2pConfig {
  let requested_force = ov.force;
  let effective_force = clamp_force(requested_force);

  let mut min_parallel_bytes = DEFAULT_MIN_PARALLEL_BYTES;
  if let Some(v) = ov.min_parallel_bytes {
    min_parallel_bytes = v;
  }
  if min_parallel_bytes < MIN_PARALLEL_FLOOR {
    min_parallel_bytes = MIN_PARALLEL_FLOOR;
  }

  Blake2pConfig {
    requested_force,
    effective_force,
    tunables: Blake2pTunables { min_parallel_bytes },
  }
}

/// Get the effective BLAKE2bp/BLAKE2sp configuration.
#[inline]
#[must_use]
pub fn get() -> Blake2pConfig {
  resolve(overrides())
}
