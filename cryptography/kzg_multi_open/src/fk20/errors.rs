/// Errors that can occur while verifying a KZG multi-point opening proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierError {
    InvalidProof,
}
