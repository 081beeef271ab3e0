use hashes::{
  FixedOutput as _, HashProvider as _,
  crypto::{Sha3, Sha3_224, Sha3_256, Sha3_384, Sha3_512},
};
use proptest::prelude::*;
use traits::Digest;

fn sha3_ref(bits: usize, data: &[u8]) -> Vec<u8> {
  use sha3::Digest as _;
  match bits {
    224 => sha3::Sha3_224::digest(data).to_vec(),
    256 => sha3::Sha3_256::digest(data).to_vec(),
    384 => sha3::Sha3_384::digest(data).to_vec(),
    _ => sha3::Sha3_512::digest(data).to_vec(),
  }
}

/// Feed `data` in pieces whose sizes are drawn from the data itself.
fn feed(data: &[u8], mut update: impl FnMut(&[u8])) {
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    update(&data[i..end]);
    i = end;
  }
}

proptest! {
  #[test]
  fn sized_types_match_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(Sha3_224::digest(&data).to_vec(), sha3_ref(224, &data));
    prop_assert_eq!(Sha3_256::digest(&data).to_vec(), sha3_ref(256, &data));
    prop_assert_eq!(Sha3_384::digest(&data).to_vec(), sha3_ref(384, &data));
    prop_assert_eq!(Sha3_512::digest(&data).to_vec(), sha3_ref(512, &data));
  }

  #[test]
  fn sized_streaming_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let mut h = <Sha3_256 as Digest>::new();
    feed(&data, |piece| Digest::update(&mut h, piece));
    prop_assert_eq!(Digest::finalize(&h).to_vec(), sha3_ref(256, &data));

    let mut h = <Sha3_512 as Digest>::new();
    feed(&data, |piece| Digest::update(&mut h, piece));
    prop_assert_eq!(Digest::finalize(&h).to_vec(), sha3_ref(512, &data));
  }

  #[test]
  fn runtime_size_matches_sha3_crate(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    size in prop::sample::select(vec![224usize, 256, 384, 512]),
  ) {
    let mut h = Sha3::new(size).unwrap();
    feed(&data, |piece| h.update(piece).unwrap());
    let mut out = vec![0u8; size / 8];
    h.finalize_into(&mut out);
    prop_assert_eq!(out, sha3_ref(size, &data));
  }
}
