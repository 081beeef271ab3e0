#![no_main]

use hashes::{
  HashError, Hasher,
  crypto::{Blake2b, Kt256, Sha3},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
  // Layout: 2 bytes requested size in bits (LE), 1 byte split, rest data.
  let bits = match input.get(..2) {
    Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]) as usize,
    _ => 0,
  };
  let data = input.get(3..).unwrap_or(&[]);
  let split = input.get(2).copied().unwrap_or(0) as usize % (data.len() + 1);

  match Hasher::<Blake2b>::with_size(bits) {
    Ok(mut h) => {
      assert!(bits % 8 == 0 && (8..=512).contains(&bits));
      h.absorb(&data[..split]).unwrap().absorb(&data[split..]).unwrap();
      let mut whole = Hasher::<Blake2b>::with_size(bits).unwrap();
      whole.absorb(data).unwrap();
      assert_eq!(h.digest(), whole.digest());
      assert_eq!(h.digest().len(), bits / 8);
    }
    Err(e) => assert_eq!(e, HashError::UnsupportedSize { bits }),
  }

  assert_eq!(Hasher::<Sha3>::with_size(bits).is_ok(), matches!(bits, 224 | 256 | 384 | 512));

  let mut x = Hasher::<Kt256>::new();
  x.absorb(&data[..split]).unwrap();
  let first = x.squeeze(split % 97 + 1);
  assert_eq!(x.absorb(&data[split..]).err(), Some(HashError::MisusedSession));
  x.reset(false);
  x.absorb(&data[..split]).unwrap();
  assert_eq!(x.squeeze(split % 97 + 1), first);
});
