//! Published test vectors: FIPS 202, SP 800-185, RFC 9861, SP 800-232,
//! RFC 7693 and FIPS 180-4.

use hashes::{
  ExtendableOutput as _, FixedOutput as _, HashProvider as _, Hasher,
  crypto::{
    AsconCxof128, AsconHash256, AsconXof128, Blake2b, Blake2b512, Blake2s256, CShake128, CShake256, Kmac128, Kmac256,
    Kt128, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Sha224, Sha384, Sha512, Sha512_224, Sha512_256, Shake128,
    Shake256, TurboShake128,
  },
};
use hex_literal::hex;
use traits::Digest;

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";
const SAMPLE: [u8; 4] = hex!("00010203");

fn kmac_key() -> [u8; 32] {
  core::array::from_fn(|i| 0x40 + i as u8)
}

/// `ptn(n)`: the repeating pattern 00 01 .. FA of RFC 9861.
fn ptn(n: usize) -> Vec<u8> {
  (0..n).map(|i| (i % 251) as u8).collect()
}

#[test]
fn fips202_empty_message() {
  assert_eq!(
    Sha3_224::digest(b""),
    hex!("6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7")
  );
  assert_eq!(
    Sha3_256::digest(b""),
    hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
  );
  assert_eq!(
    Sha3_384::digest(b""),
    hex!("0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004")
  );
  assert_eq!(
    Sha3_512::digest(b""),
    hex!(
      "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6"
      "15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
    )
  );
  assert_eq!(
    Sha3_256::digest(b"abc"),
    hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
  );

  let mut out = [0u8; 32];
  Shake128::hash_into(b"", &mut out);
  assert_eq!(out, hex!("7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"));

  let mut out = [0u8; 64];
  Shake256::hash_into(b"", &mut out);
  assert_eq!(
    out,
    hex!(
      "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
      "d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be"
    )
  );
}

#[test]
fn shake128_fox_and_squeeze_decomposition() {
  let mut h = Shake128::new();
  h.update(FOX).unwrap();
  let mut out = [0u8; 32];
  h.squeeze(&mut out[..5]);
  h.squeeze(&mut out[5..]);
  assert_eq!(out, hex!("f4202e3c5852f9182a0430fd8144f0a74b95e7417ecae17db0f8cfeed0e3e66e"));
}

#[test]
fn sp800_185_cshake_samples() {
  let mut out = [0u8; 32];
  CShake128::hash_into(b"", b"Email Signature", &SAMPLE, &mut out);
  assert_eq!(out, hex!("c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5"));

  let mut out = [0u8; 64];
  CShake256::hash_into(b"", b"Email Signature", &SAMPLE, &mut out);
  assert_eq!(
    out,
    hex!(
      "d008828e2b80ac9d2218ffee1d070c48b8e4c87bff32c9699d5b6896eee0edd1"
      "64020e2be0560858d9c00c037e34a96937c561a74c412bb4c746469527281c8c"
    )
  );
}

#[test]
fn sp800_185_kmac_samples() {
  let key = kmac_key();

  let mut out = [0u8; 32];
  Kmac128::mac_into(&key, b"", &SAMPLE, &mut out);
  assert_eq!(out, hex!("e5780b0d3ea6f7d3a429c5706aa43a00fadbd7d49628839e3187243f456ee14e"));

  let mut h = Kmac128::new(&key, b"My Tagged Application");
  h.update(&SAMPLE).unwrap();
  let tag = hex!("3b1fba963cd8b0b59e8c1a6d71888b7143651af8ba0a7070c0979e2811324aa5");
  assert!(h.verify(&tag).is_ok());
  let mut forged = tag;
  forged[31] ^= 1;
  assert!(h.verify(&forged).is_err());

  let mut h = Hasher::<Kmac256>::new();
  h.set_key(key).unwrap().set_customization("My Tagged Application").unwrap();
  h.absorb(SAMPLE).unwrap();
  assert_eq!(
    h.digest(),
    hex!(
      "20c570c31346f703c9ac36c61c03cb64c3970d0cfc787e9b79599d273a68d2f7"
      "f69d4cc3de9d104a351689f27cf6f5951f0103f33f4f24871024d9c27773a8dd"
    )
  );
}

#[test]
fn kmac_keys_filling_one_block() {
  // 3-byte length prefix + key + 2-byte rate prefix == rate.
  let key: [u8; 131] = core::array::from_fn(|i| i as u8);
  let mut h = Kmac256::new(&key, b"My Tagged Application");
  h.update(&FOX[..10]).unwrap();
  h.update(&FOX[10..]).unwrap();
  let tag = hex!(
    "7e6109b2eb51f6abb0a7fe96811885d14fa642f38f06b4eee94e199601d0dc0f"
    "c36960f866df4f92710473adef145a6990cdf767293c12db379e8707d9724d11"
  );
  let mut out = [0u8; 64];
  h.finalize_into(&mut out);
  assert_eq!(out, tag);
  assert!(h.verify(&tag).is_ok());

  let key: [u8; 163] = core::array::from_fn(|i| i as u8);
  let mut h = Hasher::<Kmac128>::new();
  h.set_key(key).unwrap().set_customization("My Tagged Application").unwrap();
  h.absorb(FOX).unwrap();
  assert_eq!(
    h.digest(),
    hex!("df11451ec67e0db72eeac27e66812adfe87d0e65d5a17aa5d8fd312d585ad2df")
  );

  let mut out = [0u8; 64];
  Kmac256::mac_into(&[0u8; 131], b"", b"abc", &mut out);
  assert_eq!(
    out,
    hex!(
      "5cce3bbb198a9b6d89ea687aa16efa5e6e72b154e293c82317e65007ffc57c99"
      "02b4711633e85efd4c3d11f3b3e9f75188190ccdcee412cc2da03b5ef0457b48"
    )
  );
}

#[test]
fn rfc9861_kt128() {
  let mut out = [0u8; 32];
  Kt128::hash_into(b"", b"", &mut out);
  assert_eq!(out, hex!("1ac2d450fc3b4205d19da7bfca1b37513c0803577ac7167f06fe2ce1f0ef39e5"));

  Kt128::hash_into(b"", &ptn(17), &mut out);
  assert_eq!(out, hex!("6bf75fa2239198db4772e36478f8e19b0f371205f6a9a93a273f51df37122888"));

  Kt128::hash_into(b"", &ptn(17 * 17), &mut out);
  assert_eq!(out, hex!("0c315ebcdedbf61426de7dcf8fb725d1e74675d7f5327a5067f367b108ecb67c"));

  let mut out = [0u8; 32];
  TurboShake128::hash_into(b"", &mut out);
  assert_eq!(out, hex!("1e415f1c5983aff2169217277d17bb538cd945a397ddec541f1ce41af2c1b74c"));
}

#[test]
fn sp800_232_ascon() {
  assert_eq!(
    AsconHash256::digest(FOX),
    hex!("23414503bf4bde7ad0e85aec94c22ae2d7cd807996b537f9564fc2974053f139")
  );

  let mut out = [0u8; 32];
  AsconXof128::hash_into(FOX, &mut out);
  assert_eq!(out, hex!("f3df449acea2811a43db747c1caa208f3402a17e5ceb43315455d7deff1ffc90"));

  let mut h = Hasher::<AsconCxof128>::new();
  h.set_customization("My Custom ASCON").unwrap().absorb(FOX).unwrap();
  assert_eq!(
    h.squeeze(32),
    hex!("73910abcd1ffbbd7685947734b964c516bff020c372d6a7b684ce23c69960598")
  );
}

#[test]
fn rfc7693_blake2() {
  assert_eq!(
    Blake2b512::digest(b"abc"),
    hex!(
      "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1"
      "7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    )
  );
  assert_eq!(
    Blake2s256::digest(b"abc"),
    hex!("508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982")
  );

  let mut h = Blake2b::new(256).unwrap();
  h.update(FOX).unwrap();
  let mut out = [0u8; 32];
  h.finalize_into(&mut out);
  assert_eq!(out, hex!("01718cec35cd3d796dd00020e0bfecb473ad23457d063b75eff29c0ffa2e58a9"));
}

#[test]
fn fips180_sha2() {
  assert_eq!(
    Sha224::digest(b""),
    hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
  );
  assert_eq!(
    Sha384::digest(b"abc"),
    hex!("cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7")
  );
  assert_eq!(
    Sha512_224::digest(b"abc"),
    hex!("4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa")
  );
  assert_eq!(
    Sha512_256::digest(b"abc"),
    hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
  );

  let mut h = Hasher::<Sha512>::new();
  h.absorb("abc").unwrap();
  assert_eq!(
    h.digest(),
    hex!(
      "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
      "2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    )
  );
}
