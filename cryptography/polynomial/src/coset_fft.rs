use bls12_381::ff::Field;
use bls12_381::Scalar;

/// Holds the generator (and its inverse) used to shift a domain into a coset
/// before performing an FFT/IFFT, so that polynomials with roots on the
/// domain can still be evaluated/interpolated without division by zero.
#[derive(Debug, Clone, Copy)]
pub struct CosetFFT {
    pub generator: Scalar,
    pub generator_inv: Scalar,
}

impl CosetFFT {
    pub fn new(generator: Scalar) -> Self {
        let generator_inv = generator.invert().expect("cosets should be non-zero");
        Self {
            generator,
            generator_inv,
        }
    }
}
