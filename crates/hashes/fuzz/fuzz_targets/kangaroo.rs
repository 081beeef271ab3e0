#![no_main]

use hashes::{
  ExtendableOutput as _, HashProvider as _,
  crypto::{Kt128, M14},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
  // Layout: custom_len, step (two bytes LE), then custom || data. Inputs are
  // replicated so short corpora still cross the 8192-byte chunk boundary.
  let custom_len = input.first().copied().unwrap_or(0) as usize % 65;
  let step = match input.get(1..3) {
    Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]) as usize % 9000 + 1,
    _ => 1,
  };
  let rest = input.get(3..).unwrap_or(&[]);
  let (custom, seed) = rest.split_at(custom_len.min(rest.len()));
  let data: Vec<u8> = seed.iter().copied().cycle().take(seed.len() * 64).collect();

  let mut expected = [0u8; 64];
  {
    use tiny_keccak::{Hasher, KangarooTwelve};
    let mut r = KangarooTwelve::new(custom);
    r.update(&data);
    r.finalize(&mut expected);
  }

  let mut h = Kt128::with_customization(custom);
  for piece in data.chunks(step) {
    h.update(piece).unwrap();
  }
  let mut ours = [0u8; 64];
  h.squeeze(&mut ours);
  assert_eq!(ours, expected);

  let mut one = [0u8; 32];
  M14::hash_into(custom, &data, &mut one);
  let mut h = M14::with_customization(custom);
  for piece in data.chunks(step) {
    h.update(piece).unwrap();
  }
  let mut streamed = [0u8; 32];
  h.squeeze(&mut streamed);
  assert_eq!(streamed, one);
});
