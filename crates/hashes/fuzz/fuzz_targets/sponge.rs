#![no_main]

use hashes::{
  ExtendableOutput as _, HashProvider as _,
  crypto::{AsconCxof128, AsconXof128, Sha3_256, Sha3_512, Shake128, Shake256},
};
use libfuzzer_sys::fuzz_target;
use traits::Digest;

fuzz_target!(|input: &[u8]| {
  // Layout: 1 byte split selector, 1 byte output length, rest is the message.
  let sel = input.first().copied().unwrap_or(0) as usize;
  let out_len = input.get(1).copied().unwrap_or(0) as usize * 3;
  let data = input.get(2..).unwrap_or(&[]);
  let (a, b) = data.split_at(sel % (data.len() + 1));

  {
    use sha3::Digest as _;
    let mut h = <Sha3_256 as Digest>::new();
    Digest::update(&mut h, a);
    Digest::update(&mut h, b);
    assert_eq!(&Digest::finalize(&h)[..], &sha3::Sha3_256::digest(data)[..]);
    assert_eq!(&Sha3_512::digest(data)[..], &sha3::Sha3_512::digest(data)[..]);
  }

  {
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    let mut expected = vec![0u8; out_len];
    let mut r = sha3::Shake128::default();
    r.update(data);
    r.finalize_xof().read(&mut expected);

    let mut h = Shake128::new();
    h.update(a).unwrap();
    h.update(b).unwrap();
    let mut ours = vec![0u8; out_len];
    let (x, y) = ours.split_at_mut(sel % (out_len + 1));
    h.squeeze(x);
    h.squeeze(y);
    assert_eq!(ours, expected);

    let mut r = sha3::Shake256::default();
    r.update(data);
    r.finalize_xof().read(&mut expected);
    Shake256::hash_into(data, &mut ours);
    assert_eq!(ours, expected);
  }

  // Ascon has no oracle here: split streaming must match one-shot, and the
  // customization must separate domains.
  {
    let mut one = vec![0u8; out_len];
    AsconXof128::hash_into(data, &mut one);

    let mut h = AsconXof128::new();
    h.update(a).unwrap();
    h.update(b).unwrap();
    let mut ours = vec![0u8; out_len];
    h.squeeze(&mut ours);
    assert_eq!(ours, one);

    let z = a.get(..a.len().min(256)).unwrap_or(&[]);
    let mut c = AsconCxof128::new(z).unwrap();
    c.update(b).unwrap();
    let mut cx = vec![0u8; out_len];
    c.squeeze(&mut cx);
    let mut expected = vec![0u8; out_len];
    AsconCxof128::hash_into(z, b, &mut expected).unwrap();
    assert_eq!(cx, expected);
  }
});
