//! Single-point KZG opening: commit to a blob's polynomial and open it at one point.
//!
//! This is the EIP-4844 proving system, kept here rather than in its own crate because
//! PeerDAS is the only consumer of it in this workspace. It shares the trusted setup
//! with the FK20 multi-opening scheme in [`kzg_multi_open`], but not its machinery:
//! a single opening is a plain KZG proof, not a coset opening, so it is cheaper to
//! implement directly against the domain than to route it through FK20.

use std::mem::size_of;

use bls12_381::{
    batch_inversion::batch_inverse,
    ff::{Field, PrimeField},
    group::Curve,
    multi_pairings, reduce_bytes_to_scalar_bias, G1Point, G1Projective, G2Point, G2Prepared,
    Scalar,
};
use polynomial::domain::Domain;
use sha2::{Digest, Sha256};

use crate::errors::VerifierError;

fn bitreverse(mut n: u32, l: u32) -> u32 {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// Permutes `a` in place so that the element at index `i` moves to `bitreverse(i)`.
pub(crate) fn bitreverse_slice<T>(a: &mut [T]) {
    if a.is_empty() {
        return;
    }

    let n = a.len();
    let log_n = n.ilog2();
    assert_eq!(n, 1 << log_n);

    for k in 0..n {
        let rk = bitreverse(k as u32, log_n) as usize;
        if k < rk {
            a.swap(rk, k);
        }
    }
}

/// Converts a u64 to a 16 byte big endian array. The leading 8 bytes are always zero;
/// this mirrors the fixed-width field that the consensus spec hashes for this value.
fn u64_to_byte_array_16(number: u64) -> [u8; 16] {
    let mut bytes = [0; 16];
    bytes[8..].copy_from_slice(&number.to_be_bytes());
    bytes
}

/// Computes the Fiat-Shamir challenge point used by `compute_blob_kzg_proof` and
/// `verify_blob_kzg_proof`, binding the proof to a specific blob and commitment.
pub(crate) fn compute_fiat_shamir_challenge(blob: &[u8], commitment: &[u8; 48]) -> Scalar {
    const DOMAIN_SEP: &str = "FSBLOBVERIFY_V1_";

    let bytes_per_field_element = Scalar::NUM_BITS.div_ceil(8) as usize;
    let field_elements_per_blob = blob.len() / bytes_per_field_element;

    let hash_input_size = DOMAIN_SEP.len()
        + 2 * size_of::<u64>() // polynomial bound
        + blob.len()
        + commitment.len();

    let mut hash_input: Vec<u8> = Vec::with_capacity(hash_input_size);
    hash_input.extend(DOMAIN_SEP.as_bytes());
    hash_input.extend(u64_to_byte_array_16(field_elements_per_blob as u64));
    hash_input.extend(blob);
    hash_input.extend(commitment);
    assert_eq!(hash_input.len(), hash_input_size);

    let mut hasher = Sha256::new();
    hasher.update(hash_input);
    let result: [u8; 32] = hasher.finalize().into();

    // We only need 128 bits of randomness for batch verification, so the bias introduced
    // by reducing a 256 bit hash to a scalar is not a concern here.
    reduce_bytes_to_scalar_bias(result)
}

/// Computes the powers of a single Fiat-Shamir challenge, used to fold many single-point
/// opening proofs into one pairing check.
pub(crate) fn compute_r_powers_for_verify_kzg_proof_batch(
    domain_size: usize,
    commitments: &[[u8; 48]],
    zs: &[Scalar],
    ys: &[Scalar],
    proofs: &[[u8; 48]],
) -> Vec<Scalar> {
    const DOMAIN_SEP: &str = "RCKZGBATCH___V1_";

    let bytes_per_field_element = Scalar::NUM_BITS.div_ceil(8) as usize;
    let n = commitments.len();

    let hash_input_size = DOMAIN_SEP.len()
        + size_of::<u64>() // polynomial bound
        + size_of::<u64>() // batch size
        + n * (48 + bytes_per_field_element + bytes_per_field_element + 48);

    let mut hash_input: Vec<u8> = Vec::with_capacity(hash_input_size);
    hash_input.extend(DOMAIN_SEP.as_bytes());
    hash_input.extend((domain_size as u64).to_be_bytes());
    hash_input.extend((n as u64).to_be_bytes());
    for (((commitment, z), y), proof) in commitments.iter().zip(zs).zip(ys).zip(proofs) {
        hash_input.extend(commitment);
        hash_input.extend(z.to_bytes_be());
        hash_input.extend(y.to_bytes_be());
        hash_input.extend(proof);
    }
    assert_eq!(hash_input.len(), hash_input_size);

    let mut hasher = Sha256::new();
    hasher.update(hash_input);
    let result: [u8; 32] = hasher.finalize().into();
    let r = reduce_bytes_to_scalar_bias(result);

    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;
    for _ in 0..n {
        powers.push(current);
        current *= r;
    }
    powers
}

/// Evaluates `polynomial` (bit-reversed Lagrange form over `domain`) at `z`.
pub(crate) fn compute_evaluation(domain: &Domain, polynomial: &[Scalar], z: Scalar) -> Scalar {
    domain.roots.iter().position(|root| *root == z).map_or_else(
        || compute_evaluation_out_of_domain(domain, polynomial, z),
        |position| {
            let mut polynomial = polynomial.to_vec();
            bitreverse_slice(&mut polynomial);
            polynomial[position]
        },
    )
}

fn compute_evaluation_out_of_domain(domain: &Domain, polynomial: &[Scalar], z: Scalar) -> Scalar {
    let domain_size = domain.roots.len();

    let mut polynomial = polynomial.to_vec();
    bitreverse_slice(&mut polynomial);

    // 1 / (z - ω^i)
    let mut denoms = domain.roots.iter().map(|root| z - *root).collect::<Vec<_>>();
    batch_inverse(&mut denoms);

    // \sum (ω^i * f(ω^i) / (z - ω^i)) * ((z^n - 1) / n)
    domain
        .roots
        .iter()
        .zip(&polynomial)
        .zip(&denoms)
        .map(|((root, f_root), denom)| root * *f_root * denom)
        .sum::<Scalar>()
        * (z.pow_vartime([domain_size as u64]) - Scalar::ONE)
        * domain.domain_size_inv
}

/// Computes the evaluation of `polynomial` at `z` along with the coefficients (in the same
/// bit-reversed Lagrange basis as `polynomial`) of the quotient `(f(X) - f(z)) / (X - z)`.
pub(crate) fn compute_evaluation_and_quotient(
    domain: &Domain,
    polynomial: &[Scalar],
    z: Scalar,
) -> (Scalar, Vec<Scalar>) {
    match domain.roots.iter().position(|root| *root == z) {
        Some(point_idx) => compute_evaluation_and_quotient_within_domain(domain, polynomial, point_idx),
        None => compute_evaluation_and_quotient_out_of_domain(domain, polynomial, z),
    }
}

fn compute_evaluation_and_quotient_out_of_domain(
    domain: &Domain,
    polynomial: &[Scalar],
    z: Scalar,
) -> (Scalar, Vec<Scalar>) {
    let mut polynomial = polynomial.to_vec();
    bitreverse_slice(&mut polynomial);

    let mut denoms = domain.roots.iter().map(|root| z - *root).collect::<Vec<_>>();
    batch_inverse(&mut denoms);

    let domain_size = domain.roots.len();

    let y = domain
        .roots
        .iter()
        .zip(&polynomial)
        .zip(&denoms)
        .map(|((root, f_root), denom)| root * *f_root * denom)
        .sum::<Scalar>()
        * (z.pow_vartime([domain_size as u64]) - Scalar::ONE)
        * domain.domain_size_inv;

    // (y - f(ω^i)) / (z - ω^i)
    let quotient = denoms
        .iter()
        .zip(&polynomial)
        .map(|(denom, f_root)| (y - *f_root) * denom)
        .collect();

    (y, quotient)
}

/// Divides when the opening point is itself a domain root.
///
/// See "Dividing when one of the points is zero" in
/// <https://dankradfeist.de/ethereum/2021/06/18/pcs-multiproofs.html>.
fn compute_evaluation_and_quotient_within_domain(
    domain: &Domain,
    polynomial: &[Scalar],
    point_idx: usize,
) -> (Scalar, Vec<Scalar>) {
    let domain_size = domain.roots.len();

    let mut polynomial = polynomial.to_vec();
    bitreverse_slice(&mut polynomial);

    let z = domain.roots[point_idx];
    let y = polynomial[point_idx];

    // 1 / (ω^m - ω^j), with the m == j term set to one so that `batch_inverse` doesn't panic.
    let mut denoms = domain
        .roots
        .iter()
        .enumerate()
        .map(|(idx, root)| if idx == point_idx { Scalar::ONE } else { z - root })
        .collect::<Vec<_>>();
    batch_inverse(&mut denoms);

    let mut quotient: Vec<Scalar> = denoms
        .iter()
        .zip(&polynomial)
        .map(|(denom, f_root)| (y - *f_root) * denom)
        .collect();

    // q(ω^m) = \sum_{j != m} q(ω^j) * (A'(ω^m) / A'(ω^j)) = \sum q(ω^j) * ω^{j - m}
    quotient[point_idx] = Scalar::ZERO;
    quotient[point_idx] = -quotient
        .iter()
        .enumerate()
        .map(|(idx, q)| *q * domain.roots[(domain_size + idx - point_idx) % domain_size])
        .sum::<Scalar>();

    (y, quotient)
}

/// Verifies that `e([f(τ) - y]G₁, G₂) == e([q(τ)]G₁, [τ - z]G₂)`, ie that the committed
/// polynomial evaluates to `y` at `z`, given the opening proof `[q(τ)]G₁`.
pub(crate) fn verify_kzg_proof(
    gen_g1: G1Point,
    gen_g2: G2Point,
    tau_g2: G2Point,
    commitment: G1Point,
    z: Scalar,
    y: Scalar,
    proof: G1Point,
) -> Result<(), VerifierError> {
    let commitment_minus_y: G1Point =
        (G1Projective::from(commitment) - G1Projective::from(gen_g1) * y).to_affine();

    let neg_gen_g2 = G2Prepared::from(-gen_g2);
    let tau_minus_z_g2 = G2Prepared::from((tau_g2 - gen_g2 * z).to_affine());

    let valid = multi_pairings(&[
        (&commitment_minus_y, &neg_gen_g2),
        (&proof, &tau_minus_z_g2),
    ]);

    if valid {
        Ok(())
    } else {
        Err(VerifierError::InvalidProof)
    }
}

/// Batch form of [`verify_kzg_proof`]: folds `n` opening claims into a single pairing check
/// using the random weights `r_powers`.
pub(crate) fn verify_kzg_proof_batch(
    gen_g1: G1Point,
    gen_g2: G2Point,
    tau_g2: G2Point,
    commitments: &[G1Point],
    zs: &[Scalar],
    ys: &[Scalar],
    proofs: &[G1Point],
    r_powers: &[Scalar],
) -> Result<(), VerifierError> {
    use bls12_381::lincomb::g1_lincomb;

    assert!(
        commitments.len() == zs.len()
            && commitments.len() == ys.len()
            && commitments.len() == proofs.len()
            && commitments.len() == r_powers.len()
    );

    // \sum r^i * [f_i(τ)] - (\sum r^i * y_i) * [1] + \sum r^i * z_i * [q_i(τ)]
    let lhs_g1: G1Point = {
        let points = commitments
            .iter()
            .chain(proofs)
            .chain([&gen_g1])
            .copied()
            .collect::<Vec<_>>();
        let scalars = r_powers
            .iter()
            .copied()
            .chain(r_powers.iter().zip(zs).map(|(r_i, z_i)| *r_i * z_i))
            .chain([-r_powers.iter().zip(ys).map(|(r_i, y_i)| *r_i * y_i).sum::<Scalar>()])
            .collect::<Vec<_>>();
        g1_lincomb(&points, &scalars)
            .expect("points and scalars have the same length")
            .to_affine()
    };

    // \sum r^i * [q_i(τ)]
    let rhs_g1: G1Point = g1_lincomb(proofs, r_powers)
        .expect("points and scalars have the same length")
        .to_affine();

    let lhs_g2 = G2Prepared::from(-gen_g2);
    let rhs_g2 = G2Prepared::from(tau_g2);

    let valid = multi_pairings(&[(&lhs_g1, &lhs_g2), (&rhs_g1, &rhs_g2)]);

    if valid {
        Ok(())
    } else {
        Err(VerifierError::InvalidProof)
    }
}
