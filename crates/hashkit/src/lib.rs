//! One streaming interface over SHA-3, SHAKE, cSHAKE, KMAC, KangarooTwelve,
//! Ascon, SHA-2 and BLAKE2.
//!
//! Every algorithm is available as a ready-made [`Hasher`] alias at the crate
//! root. The aliases absorb any `AsRef<[u8]>` input, produce a digest (fixed
//! output) or squeeze any number of bytes (XOFs), and offer only the
//! parameter setters the algorithm understands.
//!
//! # Quick Start
//!
//! ```
//! use hashkit::{Blake2b, Sha3_256, Shake256};
//!
//! // Fixed output
//! let mut h = Sha3_256::new();
//! h.absorb("The quick brown fox ")?.absorb("jumps over the lazy dog")?;
//! assert_eq!(h.hexdigest(), "69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04");
//!
//! // Runtime-checked size and parameters
//! let mut mac = Blake2b::with_size(256)?;
//! mac.set_key("secret")?.absorb("message")?;
//! assert_eq!(mac.digest().len(), 32);
//! assert!(Blake2b::with_size(300).is_err());
//!
//! // Extendable output, squeezed in pieces
//! let mut xof = Shake256::new();
//! xof.absorb(b"")?;
//! let head = xof.squeeze(16);
//! let tail = xof.squeeze(16);
//! assert_eq!(head.len() + tail.len(), 32);
//! # Ok::<(), hashkit::HashError>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Threaded BLAKE2bp/BLAKE2sp leaves and environment overrides |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! hashkit = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, BLAKE2bp/BLAKE2sp hash their leaves sequentially.
#![cfg_attr(not(feature = "std"), no_std)]

pub use hashes::{AlgorithmInfo, Describe, Hasher, config, crypto, introspect};
pub use traits::{
  Digest, ExtendableOutput, FixedOutput, HashError, HashProvider, SetCustomization, SetFunctionName, SetKey,
  SetPersonalization, SetSalt, VerificationError, WithHashSize, Xof,
};

// =============================================================================
// Keccak family
// =============================================================================

/// SHA-3 with a runtime size (224, 256, 384 or 512 bits; default 256).
pub type Sha3 = Hasher<crypto::Sha3>;
pub type Sha3_224 = Hasher<crypto::Sha3_224>;
pub type Sha3_256 = Hasher<crypto::Sha3_256>;
pub type Sha3_384 = Hasher<crypto::Sha3_384>;
pub type Sha3_512 = Hasher<crypto::Sha3_512>;
pub type Shake128 = Hasher<crypto::Shake128>;
pub type Shake256 = Hasher<crypto::Shake256>;
/// cSHAKE128: `set_function_name` and `set_customization`.
pub type CShake128 = Hasher<crypto::CShake128>;
pub type CShake256 = Hasher<crypto::CShake256>;
/// KMAC128 with a fixed output size (any multiple of 8 bits; default 256).
pub type Kmac128 = Hasher<crypto::Kmac128>;
pub type Kmac256 = Hasher<crypto::Kmac256>;
pub type KmacXof128 = Hasher<crypto::KmacXof128>;
pub type KmacXof256 = Hasher<crypto::KmacXof256>;
pub type TurboShake128 = Hasher<crypto::TurboShake128>;
pub type TurboShake256 = Hasher<crypto::TurboShake256>;
/// KangarooTwelve (KT128).
pub type K12 = Hasher<crypto::Kt128>;
pub type Kt128 = Hasher<crypto::Kt128>;
pub type Kt256 = Hasher<crypto::Kt256>;
/// MarsupilamiFourteen.
pub type M14 = Hasher<crypto::M14>;

// =============================================================================
// Ascon
// =============================================================================

pub type AsconHash256 = Hasher<crypto::AsconHash256>;
pub type AsconXof128 = Hasher<crypto::AsconXof128>;
/// Ascon-CXOF128: customization of at most 256 bytes.
pub type AsconCxof128 = Hasher<crypto::AsconCxof128>;

// =============================================================================
// SHA-2
// =============================================================================

pub type Sha224 = Hasher<crypto::Sha224>;
pub type Sha256 = Hasher<crypto::Sha256>;
pub type Sha384 = Hasher<crypto::Sha384>;
/// SHA-512 with a runtime size: 224, 256 (SHA-512/t), 384 or 512 bits.
pub type Sha512 = Hasher<crypto::Sha512>;
pub type Sha512_224 = Hasher<crypto::Sha512_224>;
pub type Sha512_256 = Hasher<crypto::Sha512_256>;

// =============================================================================
// BLAKE2
// =============================================================================

/// BLAKE2b: 8..=512-bit digests, key, salt and personalization.
pub type Blake2b = Hasher<crypto::Blake2b>;
/// BLAKE2s: 8..=256-bit digests, key, salt and personalization.
pub type Blake2s = Hasher<crypto::Blake2s>;
/// BLAKE2bp: four BLAKE2b leaves.
pub type Blake2bp = Hasher<crypto::Blake2bp>;
/// BLAKE2sp: eight BLAKE2s leaves.
pub type Blake2sp = Hasher<crypto::Blake2sp>;
