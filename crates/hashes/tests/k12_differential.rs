use hashes::{
  ExtendableOutput as _, HashProvider as _, Hasher,
  crypto::{K12, Kt128},
};
use proptest::prelude::*;
use traits::Xof as _;

fn k12_ref(customization: &[u8], data: &[u8], out: &mut [u8]) {
  use tiny_keccak::{Hasher, KangarooTwelve};
  let mut h = KangarooTwelve::new(customization);
  h.update(data);
  h.finalize(out);
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn kt128_one_shot_matches_tiny_keccak(
    customization in proptest::collection::vec(any::<u8>(), 0..300),
    data in proptest::collection::vec(any::<u8>(), 0..20_000),
    out_len in 1usize..256,
  ) {
    let mut expected = vec![0u8; out_len];
    k12_ref(&customization, &data, &mut expected);

    let mut actual = vec![0u8; out_len];
    Kt128::hash_into(&customization, &data, &mut actual);
    prop_assert_eq!(actual, expected);
  }

  #[test]
  fn kt128_streaming_matches_tiny_keccak(
    customization in proptest::collection::vec(any::<u8>(), 0..64),
    data in proptest::collection::vec(any::<u8>(), 0..30_000),
    step in 1usize..9000,
    split_out in 0usize..128,
  ) {
    let mut expected = [0u8; 128];
    k12_ref(&customization, &data, &mut expected);

    let mut h = K12::with_customization(&customization);
    for piece in data.chunks(step) {
      h.update(piece).unwrap();
    }
    let mut reader = h.finalize_xof();
    let mut actual = [0u8; 128];
    reader.squeeze(&mut actual[..split_out]);
    reader.squeeze(&mut actual[split_out..]);
    prop_assert_eq!(actual, expected);

    let mut direct = [0u8; 128];
    h.squeeze(&mut direct);
    prop_assert_eq!(direct, expected);
  }

  #[test]
  fn facade_customization_matches_tiny_keccak(
    customization in proptest::collection::vec(any::<u8>(), 0..64),
    data in proptest::collection::vec(any::<u8>(), 0..10_000),
  ) {
    let mut expected = [0u8; 48];
    k12_ref(&customization, &data, &mut expected);

    let mut h = Hasher::<Kt128>::new();
    h.set_customization(&customization).unwrap().absorb(&data).unwrap();
    prop_assert_eq!(h.squeeze(48), expected.to_vec());
  }
}
