#![no_main]

use hashes::{
  FixedOutput as _, HashProvider as _,
  crypto::{CShake128, CShake256, Kmac128, KmacXof256},
};
use libfuzzer_sys::fuzz_target;
use traits::Xof as _;

fn take<'a>(rest: &mut &'a [u8], len: usize) -> &'a [u8] {
  let (head, tail) = rest.split_at(len.min(rest.len()));
  *rest = tail;
  head
}

fuzz_target!(|input: &[u8]| {
  // Layout: name_len, custom_len, key_len, out_len (one byte each), then
  // name || custom || key || data.
  let mut hdr = [0u8; 4];
  for (h, b) in hdr.iter_mut().zip(input) {
    *h = *b;
  }
  let mut rest = input.get(4..).unwrap_or(&[]);
  let name = take(&mut rest, hdr[0] as usize % 65);
  let custom = take(&mut rest, hdr[1] as usize % 65);
  let key = take(&mut rest, hdr[2] as usize % 129);
  let out_len = hdr[3] as usize * 2 + 1;
  let data = rest;
  let split = data.first().copied().unwrap_or(0) as usize % (data.len() + 1);

  {
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    let core = if name.is_empty() {
      sha3::CShake128Core::new(custom)
    } else {
      sha3::CShake128Core::new_with_function_name(name, custom)
    };
    let mut r = sha3::CShake128::from_core(core);
    r.update(data);
    let mut expected = vec![0u8; out_len];
    r.finalize_xof().read(&mut expected);

    let mut ours = vec![0u8; out_len];
    CShake128::hash_into(name, custom, data, &mut ours);
    assert_eq!(ours, expected);

    let core = if name.is_empty() {
      sha3::CShake256Core::new(custom)
    } else {
      sha3::CShake256Core::new_with_function_name(name, custom)
    };
    let mut r = sha3::CShake256::from_core(core);
    r.update(data);
    r.finalize_xof().read(&mut expected);

    let mut h = CShake256::new_with_function_name(name, custom);
    h.update(&data[..split]).unwrap();
    h.update(&data[split..]).unwrap();
    h.finalize_xof().squeeze(&mut ours);
    assert_eq!(ours, expected);
  }

  {
    use tiny_keccak::{Hasher, IntoXof, Kmac, Xof};
    let mut r = Kmac::v128(key, custom);
    r.update(data);
    let mut expected = vec![0u8; out_len];
    r.finalize(&mut expected);

    let mut h = Kmac128::new(key, custom);
    h.update(&data[..split]).unwrap();
    h.update(&data[split..]).unwrap();
    let mut ours = vec![0u8; out_len];
    h.finalize_into(&mut ours);
    assert_eq!(ours, expected);
    let mut tag = [0u8; 32];
    h.finalize_into(&mut tag);
    assert!(h.verify(&tag).is_ok());
    assert!(h.verify(&ours).is_err());

    let mut r = Kmac::v256(key, custom);
    r.update(data);
    r.into_xof().squeeze(&mut expected);

    let mut h = KmacXof256::new(key, custom);
    h.update(data).unwrap();
    h.finalize_xof().squeeze(&mut ours);
    assert_eq!(ours, expected);
  }
});
