#![no_main]

use hashes::{
  FixedOutput as _, HashProvider as _, SetKey as _,
  config::Blake2pForce,
  crypto::{Blake2b, Blake2bp, Blake2s, Blake2sp, Sha256, Sha512},
};
use libfuzzer_sys::fuzz_target;
use traits::Digest as _;

fuzz_target!(|input: &[u8]| {
  // Layout: 1 byte digest length, 1 byte key length, then key || data.
  let len = input.first().copied().unwrap_or(0) as usize;
  let key_len = input.get(1).copied().unwrap_or(0) as usize % 33;
  let rest = input.get(2..).unwrap_or(&[]);
  let (key, data) = rest.split_at(key_len.min(rest.len()));

  {
    use sha2::Digest as _;
    assert_eq!(&Sha256::digest(data)[..], &sha2::Sha256::digest(data)[..]);

    let mut h = Sha512::new(384).unwrap();
    h.update(data).unwrap();
    let mut ours = [0u8; 48];
    h.finalize_into(&mut ours);
    assert_eq!(&ours[..], &sha2::Sha384::digest(data)[..]);
  }

  {
    use blake2::digest::{Update, VariableOutput};
    let b_len = len % 64 + 1;
    let mut r = blake2::Blake2bVar::new(b_len).unwrap();
    r.update(data);
    let mut expected = vec![0u8; b_len];
    r.finalize_variable(&mut expected).unwrap();

    let mut h = Blake2b::new(b_len * 8).unwrap();
    h.update(data).unwrap();
    let mut ours = vec![0u8; b_len];
    h.finalize_into(&mut ours);
    assert_eq!(ours, expected);

    let s_len = len % 32 + 1;
    let mut r = blake2::Blake2sVar::new(s_len).unwrap();
    r.update(data);
    let mut expected = vec![0u8; s_len];
    r.finalize_variable(&mut expected).unwrap();

    let mut h = Blake2s::new(s_len * 8).unwrap();
    h.update(data).unwrap();
    let mut ours = vec![0u8; s_len];
    h.finalize_into(&mut ours);
    assert_eq!(ours, expected);
  }

  // Threaded leaves must never change the tree digest.
  {
    let mut seq = Blake2bp::default();
    seq.set_force(Blake2pForce::Sequential);
    seq.set_key(key).unwrap();
    seq.update(data).unwrap();
    let mut thr = Blake2bp::default();
    thr.set_force(Blake2pForce::Threaded);
    thr.set_key(key).unwrap();
    thr.update(data).unwrap();
    let (mut a, mut b) = ([0u8; 64], [0u8; 64]);
    seq.finalize_into(&mut a);
    thr.finalize_into(&mut b);
    assert_eq!(a, b);

    let mut seq = Blake2sp::default();
    seq.set_force(Blake2pForce::Sequential);
    seq.set_key(key).unwrap();
    seq.update(data).unwrap();
    let mut thr = Blake2sp::default();
    thr.set_force(Blake2pForce::Threaded);
    thr.set_key(key).unwrap();
    thr.update(data).unwrap();
    let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
    seq.finalize_into(&mut a);
    thr.finalize_into(&mut b);
    assert_eq!(a, b);
  }
});
