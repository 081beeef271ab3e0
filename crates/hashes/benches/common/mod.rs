use core::hint::black_box;

/// xorshift64* stream; only used to keep inputs from being all-zero.
#[inline]
fn next(state: &mut u64) -> u64 {
  let mut x = *state;
  x ^= x >> 12;
  x ^= x << 25;
  x ^= x >> 27;
  *state = x;
  x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

pub fn input(len: usize) -> Vec<u8> {
  let mut state = 0x5EED_F00D_B0A7_C0DE ^ (len as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  let out: Vec<u8> = (0..len).map(|_| (next(&mut state) >> 56) as u8).collect();
  black_box(&out);
  out
}

/// Sizes around the interesting boundaries: Ascon's 8-byte rate, the SHA-2
/// and BLAKE2 blocks, the Keccak rates, a BLAKE2bp/sp superblock, one
/// KangarooTwelve chunk, and bulk.
pub fn sized_inputs() -> Vec<(usize, Vec<u8>)> {
  [0usize, 8, 64, 128, 136, 168, 512, 8192, 8193, 64 * 1024, 1024 * 1024]
    .into_iter()
    .map(|len| (len, input(len)))
    .collect()
}

pub fn set_throughput(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>, len: usize) {
  if len == 0 {
    group.throughput(criterion::Throughput::Elements(1));
  } else {
    group.throughput(criterion::Throughput::Bytes(len as u64));
  }
}
