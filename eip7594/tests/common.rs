use bls12_381::Scalar;
use rust_eth_kzg::constants::{BYTES_PER_BLOB, FIELD_ELEMENTS_PER_BLOB};

/// Builds a deterministic, non-trivial blob from a seed so that tests do not
/// need to depend on external fixture files.
#[allow(dead_code)]
pub fn dummy_blob(seed: u64) -> [u8; BYTES_PER_BLOB] {
    let blob: Vec<u8> = (0..FIELD_ELEMENTS_PER_BLOB)
        .map(|i| Scalar::from(seed.wrapping_mul(7919).wrapping_add(i as u64)))
        .flat_map(|scalar| scalar.to_bytes_be())
        .collect();
    blob.try_into().expect("blob has the expected length")
}

/// A blob whose every field element is zero, ie the polynomial is identically zero.
#[allow(dead_code)]
pub fn zero_blob() -> [u8; BYTES_PER_BLOB] {
    [0u8; BYTES_PER_BLOB]
}
