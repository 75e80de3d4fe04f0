use bls12_381::fixed_base_msm::UsePrecomp;
use bls12_381::G1Point;
use erasure_codes::ReedSolomon;
use kzg_multi_open::{commit_key::CommitKey, Prover, ProverInput};
use polynomial::domain::Domain;

use crate::{
    constants::{
        CELLS_PER_EXT_BLOB, EXTENSION_FACTOR, FIELD_ELEMENTS_PER_BLOB, FIELD_ELEMENTS_PER_CELL,
        FIELD_ELEMENTS_PER_EXT_BLOB,
    },
    errors::Error,
    kzg_proof,
    recovery::recover_polynomial_coeff,
    serialization::{
        deserialize_blob_to_scalars, deserialize_bytes_to_scalar, serialize_cells,
        serialize_cells_and_proofs, serialize_g1_compressed,
    },
    trusted_setup::TrustedSetup,
    BlobRef, Bytes48Ref, Bytes32Ref, Cell, CellIndex, CellRef, DASContext, KZGCommitment, KZGProof,
};

/// Context object that is used to call functions in the prover API.
/// This includes, computing the commitments, proofs and cells.
#[derive(Debug)]
pub struct ProverContext {
    pub(crate) kzg_multipoint_prover: Prover,
    pub(crate) rs: ReedSolomon,

    /// Domain over the (un-extended) blob, used for the single-point opening proofs
    /// from EIP-4844.
    pub(crate) single_open_domain: Domain,
    /// The trusted setup in Lagrange form, used to commit to the quotient polynomial
    /// of a single-point opening without first converting it to monomial form.
    g1_lagrange: Vec<G1Point>,
}

impl Default for ProverContext {
    fn default() -> Self {
        let trusted_setup = TrustedSetup::default();
        Self::new(&trusted_setup, UsePrecomp::No)
    }
}

impl ProverContext {
    pub fn new(trusted_setup: &TrustedSetup, use_precomp: UsePrecomp) -> Self {
        let commit_key = CommitKey::from(trusted_setup);

        // The number of points that we will make an opening proof for,
        // ie a proof will attest to the value of a polynomial at these points.
        let point_set_size = FIELD_ELEMENTS_PER_CELL;

        // The number of points that we will be making proofs for.
        //
        // Note: it is easy to calculate the number of proofs that we need to make
        // by doing number_of_points_to_open / point_set_size.
        let number_of_points_to_open = FIELD_ELEMENTS_PER_EXT_BLOB;

        let kzg_multipoint_prover = Prover::new(
            commit_key,
            FIELD_ELEMENTS_PER_BLOB,
            point_set_size,
            number_of_points_to_open,
            use_precomp,
        );

        let rs = ReedSolomon::new(
            FIELD_ELEMENTS_PER_BLOB,
            EXTENSION_FACTOR,
            CELLS_PER_EXT_BLOB,
        );

        Self {
            kzg_multipoint_prover,
            rs,
            single_open_domain: Domain::new(FIELD_ELEMENTS_PER_BLOB),
            g1_lagrange: trusted_setup.g1_lagrange_points(),
        }
    }
}

impl DASContext {
    /// Computes the KZG commitment to the polynomial represented by the blob.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#blob_to_kzg_commitment
    pub fn blob_to_kzg_commitment(&self, blob: BlobRef) -> Result<KZGCommitment, Error> {
        // Deserialize the blob into scalars.
        let scalars = deserialize_blob_to_scalars(blob)?;

        // Compute commitment
        let commitment = self
            .prover_ctx
            .kzg_multipoint_prover
            .commit(ProverInput::Data(scalars));

        // Serialize the commitment.
        Ok(serialize_g1_compressed(&commitment))
    }

    /// Computes the cells and the KZG proofs for the given blob.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/_features/eip7594/polynomial-commitments-sampling.md#compute_cells_and_kzg_proofs
    pub fn compute_cells_and_kzg_proofs(
        &self,
        blob: BlobRef,
    ) -> Result<([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]), Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("compute_cells_and_kzg_proofs").entered();

        // Deserialization
        //
        let scalars = deserialize_blob_to_scalars(blob)?;

        // Computation
        //
        let (proofs, cells) = self
            .prover_ctx
            .kzg_multipoint_prover
            .compute_multi_opening_proofs(ProverInput::Data(scalars));

        Ok(serialize_cells_and_proofs(&cells, &proofs))
    }

    /// Computes the cells for the given blob, without their opening proofs.
    pub fn compute_cells(&self, blob: BlobRef) -> Result<[Cell; CELLS_PER_EXT_BLOB], Error> {
        // Deserialization
        //
        let scalars = deserialize_blob_to_scalars(blob)?;

        // Computation
        //
        let extended_blob = self
            .prover_ctx
            .kzg_multipoint_prover
            .extend_polynomial(ProverInput::Data(scalars));

        Ok(serialize_cells(&extended_blob))
    }

    /// Recovers the cells and computes the KZG proofs, given a subset of cells.
    ///
    /// Use erasure decoding to recover the polynomial corresponding to the cells
    /// that were provided as input.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/_features/eip7594/polynomial-commitments-sampling.md#recover_cells_and_kzg_proofs
    pub fn recover_cells_and_kzg_proofs(
        &self,
        cell_indices: Vec<CellIndex>,
        cells: Vec<CellRef>,
    ) -> Result<([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]), Error> {
        // Recover polynomial
        //
        let poly_coeff = recover_polynomial_coeff(&self.prover_ctx.rs, cell_indices, cells)?;

        // Compute proofs and evaluation sets
        //
        let (proofs, coset_evaluations) = self
            .prover_ctx
            .kzg_multipoint_prover
            .compute_multi_opening_proofs(ProverInput::PolyCoeff(poly_coeff));

        Ok(serialize_cells_and_proofs(&coset_evaluations, &proofs))
    }

    /// Computes a KZG proof that a blob's polynomial evaluates to a given value at `z`.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#compute_kzg_proof
    pub fn compute_kzg_proof(
        &self,
        blob: BlobRef,
        z: Bytes32Ref,
    ) -> Result<(KZGProof, [u8; 32]), Error> {
        let polynomial = deserialize_blob_to_scalars(blob)?;
        let z = deserialize_bytes_to_scalar(z)?;

        // `polynomial` is in the same bit-reversed Lagrange order as the blob; the domain
        // helpers un-reverse it internally and hand back the quotient in natural domain order.
        let domain = &self.prover_ctx.single_open_domain;
        let (y, mut quotient) = kzg_proof::compute_evaluation_and_quotient(domain, &polynomial, z);

        // `g1_lagrange` is keyed by bit-reversed index, matching the blob's own order, so the
        // quotient must be re-reversed before it can be committed to with it.
        kzg_proof::bitreverse_slice(&mut quotient);

        let proof: G1Point = bls12_381::lincomb::g1_lincomb(&self.prover_ctx.g1_lagrange, &quotient)
            .expect("g1_lagrange and quotient have the same length")
            .into();

        Ok((serialize_g1_compressed(&proof), y.to_bytes_be()))
    }

    /// Computes the KZG proof used to verify a blob against its commitment, for inclusion
    /// in a blob sidecar.
    ///
    /// The matching function in the specs is: https://github.com/ethereum/consensus-specs/blob/13ac373a2c284dc66b48ddd2ef0a10537e4e0de6/specs/deneb/polynomial-commitments.md#compute_blob_kzg_proof
    pub fn compute_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment: Bytes48Ref,
    ) -> Result<KZGProof, Error> {
        let z = kzg_proof::compute_fiat_shamir_challenge(blob, commitment);
        let (proof, _y) = self.compute_kzg_proof(blob, &z.to_bytes_be())?;
        Ok(proof)
    }
}
