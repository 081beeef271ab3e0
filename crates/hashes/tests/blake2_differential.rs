use hashes::{
  HashProvider as _, Hasher, SetKey as _, SetPersonalization as _, SetSalt as _,
  config::Blake2pForce,
  crypto::{Blake2b, Blake2b512, Blake2bp, Blake2s, Blake2s256, Blake2sp},
};
use proptest::prelude::*;
use traits::Digest;

fn blake2b_var_ref(len: usize, data: &[u8]) -> Vec<u8> {
  use blake2::digest::{Update, VariableOutput};
  let mut h = blake2::Blake2bVar::new(len).unwrap();
  h.update(data);
  let mut out = vec![0u8; len];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn blake2s_var_ref(len: usize, data: &[u8]) -> Vec<u8> {
  use blake2::digest::{Update, VariableOutput};
  let mut h = blake2::Blake2sVar::new(len).unwrap();
  h.update(data);
  let mut out = vec![0u8; len];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn digest(h: &impl hashes::FixedOutput) -> Vec<u8> {
  let mut out = vec![0u8; h.hash_size() / 8];
  h.finalize_into(&mut out);
  out
}

proptest! {
  #[test]
  fn sized_types_match_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    use blake2::Digest as _;
    prop_assert_eq!(&Blake2b512::digest(&data)[..], &blake2::Blake2b512::digest(&data)[..]);
    prop_assert_eq!(&Blake2s256::digest(&data)[..], &blake2::Blake2s256::digest(&data)[..]);
  }

  #[test]
  fn sized_streaming_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let expected = blake2b_var_ref(64, &data);
    let mut h = <Blake2b512 as Digest>::new();

    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      Digest::update(&mut h, &data[i..end]);
      i = end;
    }
    prop_assert_eq!(Digest::finalize(&h).to_vec(), expected);
  }

  #[test]
  fn runtime_sizes_match_blake2(
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    b_len in 1usize..=64,
    s_len in 1usize..=32,
  ) {
    let mut b = Blake2b::new(b_len * 8).unwrap();
    b.update(&data).unwrap();
    prop_assert_eq!(digest(&b), blake2b_var_ref(b_len, &data));

    let mut s = Blake2s::new(s_len * 8).unwrap();
    s.update(&data).unwrap();
    prop_assert_eq!(digest(&s), blake2s_var_ref(s_len, &data));
  }

  #[test]
  fn keyed_salted_personalized_blake2b_matches_blake2(
    key in proptest::collection::vec(any::<u8>(), 1..=64),
    salt in any::<[u8; 16]>(),
    personal in any::<[u8; 16]>(),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    use blake2::digest::Mac;
    let mut mac = blake2::Blake2bMac512::new_with_salt_and_personal(&key, &salt, &personal).unwrap();
    mac.update(&data);
    let expected = mac.finalize().into_bytes().to_vec();

    let mut h = Blake2b::default();
    h.set_key(&key).unwrap();
    h.set_salt(&salt).unwrap();
    h.set_personalization(&personal).unwrap();
    h.update(&data).unwrap();
    prop_assert_eq!(digest(&h), expected);
  }

  #[test]
  fn keyed_blake2s_facade_matches_blake2(
    key in proptest::collection::vec(any::<u8>(), 1..=32),
    salt in any::<[u8; 8]>(),
    personal in any::<[u8; 8]>(),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    use blake2::digest::Mac;
    let mut mac = blake2::Blake2sMac256::new_with_salt_and_personal(&key, &salt, &personal).unwrap();
    mac.update(&data);
    let expected = mac.finalize().into_bytes().to_vec();

    let mut h = Hasher::<Blake2s>::new();
    h.set_key(&key).unwrap().set_salt(salt).unwrap().set_personalization(personal).unwrap();
    h.absorb(&data).unwrap();
    prop_assert_eq!(h.digest(), expected);
  }

  #[test]
  fn tree_modes_agree(
    data in proptest::collection::vec(any::<u8>(), 0..40_000),
    split in any::<usize>(),
    key in proptest::collection::vec(any::<u8>(), 0..=32),
  ) {
    let split = split % (data.len() + 1);

    let mut seq = Blake2bp::default();
    seq.set_force(Blake2pForce::Sequential);
    seq.set_key(&key).unwrap();
    seq.update(&data).unwrap();

    let mut thr = Blake2bp::default();
    thr.set_force(Blake2pForce::Threaded);
    thr.set_key(&key).unwrap();
    thr.update(&data[..split]).unwrap();
    thr.update(&data[split..]).unwrap();
    prop_assert_eq!(digest(&seq), digest(&thr));

    let mut seq = Blake2sp::default();
    seq.set_force(Blake2pForce::Sequential);
    seq.set_key(&key).unwrap();
    seq.update(&data).unwrap();

    let mut auto = Blake2sp::default();
    auto.set_key(&key).unwrap();
    auto.update(&data[..split]).unwrap();
    auto.update(&data[split..]).unwrap();
    prop_assert_eq!(digest(&seq), digest(&auto));
  }
}
