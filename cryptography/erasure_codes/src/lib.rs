pub mod errors;
mod reed_solomon;

pub use errors::RSError;
pub use reed_solomon::{BlockErasureIndices, ReedSolomon};
