use rust_eth_kzg::{constants::CELLS_PER_EXT_BLOB, Bytes48Ref, CellIndex, CellRef, DASContext};

mod common;
use common::dummy_blob;

#[test]
fn produces_the_expected_number_of_cells_and_proofs() {
    let ctx = DASContext::default();
    let blob = dummy_blob(7);

    let (cells, proofs) = ctx.compute_cells_and_kzg_proofs(&blob).unwrap();

    assert_eq!(cells.len(), CELLS_PER_EXT_BLOB);
    assert_eq!(proofs.len(), CELLS_PER_EXT_BLOB);
}

#[test]
fn is_deterministic() {
    let ctx = DASContext::default();
    let blob = dummy_blob(7);

    let (cells_a, proofs_a) = ctx.compute_cells_and_kzg_proofs(&blob).unwrap();
    let (cells_b, proofs_b) = ctx.compute_cells_and_kzg_proofs(&blob).unwrap();

    assert_eq!(cells_a, cells_b);
    assert_eq!(proofs_a, proofs_b);
}

#[test]
fn cells_agree_with_compute_cells() {
    let ctx = DASContext::default();
    let blob = dummy_blob(7);

    let (cells, _proofs) = ctx.compute_cells_and_kzg_proofs(&blob).unwrap();
    let cells_only = ctx.compute_cells(&blob).unwrap();

    assert_eq!(cells, cells_only);
}

#[test]
fn every_cell_and_proof_verifies_against_the_commitment() {
    let ctx = DASContext::default();
    let blob = dummy_blob(7);

    let commitment = ctx.blob_to_kzg_commitment(&blob).unwrap();
    let (cells, proofs) = ctx.compute_cells_and_kzg_proofs(&blob).unwrap();

    let commitments = vec![&commitment; CELLS_PER_EXT_BLOB];
    let cell_indices: Vec<CellIndex> = (0..CELLS_PER_EXT_BLOB).map(|i| i as CellIndex).collect();
    let cell_refs: Vec<CellRef> = cells.iter().map(AsRef::as_ref).collect();
    let proof_refs: Vec<Bytes48Ref> = proofs.iter().collect();

    ctx.verify_cell_kzg_proof_batch(commitments, &cell_indices, cell_refs, proof_refs)
        .expect("every produced cell and proof should verify");
}
