use std::collections::HashMap;

pub use crate::errors::VerifierError;

use crate::{
    constants::{CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_BLOB, FIELD_ELEMENTS_PER_EXT_BLOB},
    errors::Error,
    kzg_proof,
    serialization::{
        deserialize_bytes_to_scalar, deserialize_cells, deserialize_compressed_g1,
        deserialize_compressed_g1_points,
    },
    trusted_setup::TrustedSetup,
    BlobRef, Bytes32Ref, Bytes48Ref, CellIndex, CellRef, DASContext,
};
use kzg_multi_open::{verification_key::VerificationKey, Verifier};

/// The context object that is used to call functions in the verifier API.
#[derive(Debug)]
pub struct VerifierContext {
    kzg_multipoint_verifier: Verifier,
}

impl Default for VerifierContext {
    fn default() -> Self {
        let trusted_setup = TrustedSetup::default();
        Self::new(&trusted_setup)
    }
}

impl VerifierContext {
    pub fn new(trusted_setup: &TrustedSetup) -> Self {
        let verification_key = VerificationKey::from(trusted_setup);

        let multipoint_verifier = Verifier::new(
            verification_key,
            FIELD_ELEMENTS_PER_EXT_BLOB,
            CELLS_PER_EXT_BLOB,
        );

        Self {
            kzg_multipoint_verifier: multipoint_verifier,
        }
    }
}

/// Deduplicates a vector and creates a mapping of original indices to deduplicated indices.
///
/// This function takes a vector of items and returns two vectors:
/// 1. A vector of unique items (deduplicated vector)
/// 2. A vector of indices that maps each item in the original vector to its position
///    in the deduplicated vector
fn deduplicate_with_indices<T: Eq + std::hash::Hash + Clone>(input: Vec<T>) -> (Vec<T>, Vec<u64>) {
    let mut unique = Vec::new();
    let mut map = HashMap::new();

    let indices = input
        .into_iter()
        .map(|item| {
            *map.entry(item.clone()).or_insert_with(|| {
                let idx = unique.len();
                unique.push(item);
                idx
            }) as u64
        })
        .collect();

    (unique, indices)
}

impl DASContext {
    /// Given a collection of commitments, cells and proofs, this functions verifies that
    /// the cells are consistent with the commitments using their respective KZG proofs.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/_features/eip7594/polynomial-commitments-sampling.md#verify_cell_kzg_proof_batch
    pub fn verify_cell_kzg_proof_batch(
        &self,
        commitments: Vec<Bytes48Ref>,
        cell_indices: &[CellIndex],
        cells: Vec<CellRef>,
        proofs_bytes: Vec<Bytes48Ref>,
    ) -> Result<(), Error> {
        let (deduplicated_commitments, row_indices) = deduplicate_with_indices(commitments);

        // Validation
        validation::verify_cell_kzg_proof_batch(
            &deduplicated_commitments,
            &row_indices,
            cell_indices,
            &cells,
            &proofs_bytes,
        )?;

        // If there are no inputs, we return early with no error
        if cells.is_empty() {
            return Ok(());
        }

        // Deserialization
        let row_commitments_ = deserialize_compressed_g1_points(deduplicated_commitments)?;
        let proofs_ = deserialize_compressed_g1_points(proofs_bytes)?;
        let coset_evals = deserialize_cells(cells)?;

        // Computation
        self.verifier_ctx
            .kzg_multipoint_verifier
            .verify_multi_opening(
                &row_commitments_,
                &row_indices,
                cell_indices,
                &coset_evals,
                &proofs_,
            )
            .map_err(VerifierError::from)
            .map_err(Into::into)
    }

    /// Verifies that a single cell is consistent with a commitment, using its KZG proof.
    ///
    /// This is a thin wrapper around `verify_cell_kzg_proof_batch` for a batch of size one.
    pub fn verify_cell_kzg_proof(
        &self,
        commitment: Bytes48Ref,
        cell_index: CellIndex,
        cell: CellRef,
        proof: Bytes48Ref,
    ) -> Result<(), Error> {
        self.verify_cell_kzg_proof_batch(vec![commitment], &[cell_index], vec![cell], vec![proof])
    }

    /// Verifies a KZG proof that a committed polynomial evaluates to `y` at `z`.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#verify_kzg_proof
    pub fn verify_kzg_proof(
        &self,
        commitment: Bytes48Ref,
        z: Bytes32Ref,
        y: Bytes32Ref,
        proof: Bytes48Ref,
    ) -> Result<(), Error> {
        let commitment = deserialize_compressed_g1(commitment)?;
        let proof = deserialize_compressed_g1(proof)?;
        let z = deserialize_bytes_to_scalar(z)?;
        let y = deserialize_bytes_to_scalar(y)?;

        let vk = &self.verifier_ctx.kzg_multipoint_verifier.verification_key;
        kzg_proof::verify_kzg_proof(vk.g1s[0], vk.g2s[0], vk.g2s[1], commitment, z, y, proof)
            .map_err(Into::into)
    }

    /// Verifies a KZG proof that binds a blob to its commitment.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#verify_blob_kzg_proof
    pub fn verify_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment: Bytes48Ref,
        proof: Bytes48Ref,
    ) -> Result<(), Error> {
        let z = kzg_proof::compute_fiat_shamir_challenge(blob, commitment);
        let y = kzg_proof::compute_evaluation(
            &self.prover_ctx.single_open_domain,
            &crate::serialization::deserialize_blob_to_scalars(blob)?,
            z,
        );

        let commitment_point = deserialize_compressed_g1(commitment)?;
        let proof_point = deserialize_compressed_g1(proof)?;

        let vk = &self.verifier_ctx.kzg_multipoint_verifier.verification_key;
        kzg_proof::verify_kzg_proof(
            vk.g1s[0],
            vk.g2s[0],
            vk.g2s[1],
            commitment_point,
            z,
            y,
            proof_point,
        )
        .map_err(Into::into)
    }

    /// Verifies a batch of blob/commitment/proof triples, folding all of the pairing checks
    /// into one via a random linear combination.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#verify_blob_kzg_proof_batch
    pub fn verify_blob_kzg_proof_batch(
        &self,
        blobs: Vec<BlobRef>,
        commitments: Vec<Bytes48Ref>,
        proofs: Vec<Bytes48Ref>,
    ) -> Result<(), Error> {
        if blobs.len() != commitments.len() || blobs.len() != proofs.len() {
            return Err(VerifierError::BlobBatchVerificationInputsMustHaveSameLength {
                blobs_len: blobs.len(),
                commitments_len: commitments.len(),
                proofs_len: proofs.len(),
            }
            .into());
        }

        if blobs.is_empty() {
            return Ok(());
        }

        let domain = &self.prover_ctx.single_open_domain;

        let mut zs = Vec::with_capacity(blobs.len());
        let mut ys = Vec::with_capacity(blobs.len());
        let mut commitment_points = Vec::with_capacity(blobs.len());
        let mut proof_points = Vec::with_capacity(blobs.len());

        for i in 0..blobs.len() {
            let polynomial = crate::serialization::deserialize_blob_to_scalars(blobs[i])?;
            let z = kzg_proof::compute_fiat_shamir_challenge(blobs[i], commitments[i]);
            let y = kzg_proof::compute_evaluation(domain, &polynomial, z);

            zs.push(z);
            ys.push(y);
            commitment_points.push(deserialize_compressed_g1(commitments[i])?);
            proof_points.push(deserialize_compressed_g1(proofs[i])?);
        }

        let commitment_bytes: Vec<[u8; 48]> = commitments.iter().map(|c| **c).collect();
        let proof_bytes: Vec<[u8; 48]> = proofs.iter().map(|p| **p).collect();
        let r_powers = kzg_proof::compute_r_powers_for_verify_kzg_proof_batch(
            FIELD_ELEMENTS_PER_BLOB,
            &commitment_bytes,
            &zs,
            &ys,
            &proof_bytes,
        );

        let vk = &self.verifier_ctx.kzg_multipoint_verifier.verification_key;
        kzg_proof::verify_kzg_proof_batch(
            vk.g1s[0],
            vk.g2s[0],
            vk.g2s[1],
            &commitment_points,
            &zs,
            &ys,
            &proof_points,
            &r_powers,
        )
        .map_err(Into::into)
    }

    /// Recovers all of the cells of an extended blob from any half of them.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/_features/eip7594/polynomial-commitments-sampling.md#recover_cells_and_kzg_proofs
    pub fn recover_all_cells(
        &self,
        cell_indices: Vec<CellIndex>,
        cells: Vec<CellRef>,
    ) -> Result<[crate::Cell; CELLS_PER_EXT_BLOB], Error> {
        let poly_coeff =
            crate::recovery::recover_polynomial_coeff(&self.prover_ctx.rs, cell_indices, cells)?;

        let extended_blob = self
            .prover_ctx
            .kzg_multipoint_prover
            .extend_polynomial(kzg_multi_open::ProverInput::PolyCoeff(poly_coeff));

        Ok(crate::serialization::serialize_cells(&extended_blob))
    }
}

mod validation {
    use kzg_multi_open::CommitmentIndex;

    use crate::{
        constants::CELLS_PER_EXT_BLOB, verifier::VerifierError, Bytes48Ref, CellIndex, CellRef,
    };

    /// Validation logic for `verify_cell_kzg_proof_batch`
    pub fn verify_cell_kzg_proof_batch(
        deduplicated_commitments_bytes: &[Bytes48Ref],
        commitment_indices: &[CommitmentIndex],
        cell_indices: &[CellIndex],
        cells: &[CellRef],
        proofs_bytes: &[Bytes48Ref],
    ) -> Result<(), VerifierError> {
        // All inputs must have the same length according to the specs.
        let same_length = (commitment_indices.len() == cell_indices.len())
            & (commitment_indices.len() == cells.len())
            & (commitment_indices.len() == proofs_bytes.len());
        if !same_length {
            return Err(VerifierError::BatchVerificationInputsMustHaveSameLength {
                commitment_indices_len: commitment_indices.len(),
                cell_indices_len: cell_indices.len(),
                cells_len: cells.len(),
                proofs_len: proofs_bytes.len(),
            });
        }

        // Check that the commitment indices are within the correct range
        for commitment_index in commitment_indices {
            if *commitment_index >= deduplicated_commitments_bytes.len() as u64 {
                return Err(VerifierError::InvalidCommitmentIndex {
                    commitment_index: *commitment_index,
                    max_number_of_commitments: deduplicated_commitments_bytes.len() as u64,
                });
            }
        }

        // Check that cell indices are in the correct range
        for cell_index in cell_indices {
            if *cell_index >= CELLS_PER_EXT_BLOB as u64 {
                return Err(VerifierError::CellIndexOutOfRange {
                    cell_index: *cell_index,
                    max_number_of_cells: CELLS_PER_EXT_BLOB as u64,
                });
            }
        }

        Ok(())
    }
}
