use bls12_381::Scalar;
use criterion::{criterion_group, criterion_main, Criterion};
use rust_eth_kzg::{
    constants::{BYTES_PER_BLOB, CELLS_PER_EXT_BLOB},
    CellIndex, DASContext, TrustedSetup,
};

const POLYNOMIAL_LEN: usize = 4096;

fn dummy_blob() -> [u8; BYTES_PER_BLOB] {
    let polynomial = (0..POLYNOMIAL_LEN).map(|i| -Scalar::from(i as u64));
    let blob: Vec<_> = polynomial
        .into_iter()
        .flat_map(|scalar| scalar.to_bytes_be())
        .collect();
    blob.try_into().expect("blob conversion failed")
}

fn dummy_context() -> DASContext {
    let trusted_setup = TrustedSetup::default();
    DASContext::new(
        &trusted_setup,
        bls12_381::fixed_base_msm::UsePrecomp::Yes { width: 8 },
    )
}

pub fn bench_compute_cells_and_kzg_proofs(c: &mut Criterion) {
    let blob = dummy_blob();
    let ctx = dummy_context();

    c.bench_function("computing cells_and_kzg_proofs - single threaded", |b| {
        b.iter(|| ctx.compute_cells_and_kzg_proofs(&blob));
    });
}

pub fn bench_recover_cells_and_compute_kzg_proofs(c: &mut Criterion) {
    let blob = dummy_blob();
    let ctx = dummy_context();
    let (cells, _) = ctx
        .compute_cells_and_kzg_proofs(&blob)
        .expect("failed to compute cells and kzg proofs");

    let cell_indices: Vec<CellIndex> = (0..cells.len()).map(|x| x as CellIndex).collect();
    let half_cell_indices = &cell_indices[..CELLS_PER_EXT_BLOB / 2];
    let half_cells = &cells[..CELLS_PER_EXT_BLOB / 2];
    let half_cells = half_cells.iter().map(AsRef::as_ref).collect::<Vec<_>>();

    c.bench_function(
        "worst-case recover_cells_and_kzg_proofs - single threaded",
        |b| {
            b.iter(|| {
                ctx.recover_cells_and_kzg_proofs(half_cell_indices.to_vec(), half_cells.clone())
            });
        },
    );
}

pub fn bench_init_context(c: &mut Criterion) {
    c.bench_function("Initialize context - single threaded", |b| {
        b.iter(dummy_context);
    });
}

criterion_group!(
    benches,
    bench_init_context,
    bench_compute_cells_and_kzg_proofs,
    bench_recover_cells_and_compute_kzg_proofs
);
criterion_main!(benches);
