mod coset_fft;
pub mod domain;
mod fft;
pub mod poly_coeff;

pub use coset_fft::CosetFFT;
pub use domain::Domain;
