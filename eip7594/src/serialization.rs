use crate::constants::{
    BYTES_PER_BLOB, BYTES_PER_CELL, BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT,
    CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_CELL,
};
use crate::errors::SerializationError;
use crate::{Cell, KZGProof};
use bls12_381::{G1Point, Scalar};

fn deserialize_bytes_to_scalars(bytes: &[u8]) -> Result<Vec<Scalar>, SerializationError> {
    // Check that the bytes are a multiple of the scalar size
    if bytes.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(SerializationError::ScalarHasInvalidLength {
            length: bytes.len(),
            bytes: bytes.to_vec(),
        });
    }

    let bytes32s = bytes.chunks_exact(BYTES_PER_FIELD_ELEMENT);

    let mut scalars = Vec::with_capacity(bytes32s.len());
    for bytes32 in bytes32s {
        scalars.push(deserialize_bytes_to_scalar(bytes32)?);
    }
    Ok(scalars)
}

pub(crate) fn deserialize_blob_to_scalars(
    blob_bytes: &[u8],
) -> Result<Vec<Scalar>, SerializationError> {
    if blob_bytes.len() != BYTES_PER_BLOB {
        return Err(SerializationError::BlobHasInvalidLength {
            length: blob_bytes.len(),
            bytes: blob_bytes.to_vec(),
        });
    }
    deserialize_bytes_to_scalars(blob_bytes)
}

pub(crate) fn deserialize_cell_to_scalars(
    cell_bytes: &[u8],
) -> Result<Vec<Scalar>, SerializationError> {
    deserialize_bytes_to_scalars(cell_bytes)
}

pub(crate) fn deserialize_cells(
    cells: Vec<&[u8; BYTES_PER_CELL]>,
) -> Result<Vec<Vec<Scalar>>, SerializationError> {
    cells
        .into_iter()
        .map(|cell| deserialize_cell_to_scalars(cell))
        .collect()
}

pub(crate) fn deserialize_bytes_to_scalar(
    scalar_bytes: &[u8],
) -> Result<Scalar, SerializationError> {
    let bytes32: [u8; BYTES_PER_FIELD_ELEMENT] = scalar_bytes.try_into().expect(
        "infallible: expected chunks to be exactly BYTES_PER_FIELD_ELEMENT bytes, since the \
         total length was checked to be a multiple of BYTES_PER_FIELD_ELEMENT",
    );

    // Convert the CtOption into Option
    let option_scalar: Option<Scalar> = Scalar::from_bytes_be(&bytes32).into();
    option_scalar.ok_or_else(|| SerializationError::CouldNotDeserializeScalar {
        bytes: scalar_bytes.to_vec(),
    })
}

pub(crate) fn deserialize_compressed_g1(point_bytes: &[u8]) -> Result<G1Point, SerializationError> {
    let point_bytes: [u8; BYTES_PER_G1_POINT] = match point_bytes.try_into() {
        Ok(bytes) => bytes,
        Err(_) => {
            return Err(SerializationError::G1PointHasInvalidLength {
                length: point_bytes.len(),
                bytes: point_bytes.to_vec(),
            })
        }
    };

    let opt_g1: Option<G1Point> = Option::from(G1Point::from_compressed(&point_bytes));
    opt_g1.ok_or(SerializationError::CouldNotDeserializeG1Point {
        bytes: point_bytes.to_vec(),
    })
}

pub(crate) fn deserialize_compressed_g1_points(
    points: Vec<&[u8; BYTES_PER_G1_POINT]>,
) -> Result<Vec<G1Point>, SerializationError> {
    points
        .into_iter()
        .map(|point| deserialize_compressed_g1(point))
        .collect()
}

pub(crate) fn serialize_g1_compressed(point: &G1Point) -> [u8; BYTES_PER_G1_POINT] {
    point.to_compressed()
}

pub(crate) fn serialize_scalars_to_cell(scalars: &[Scalar]) -> Vec<u8> {
    assert_eq!(
        scalars.len(),
        FIELD_ELEMENTS_PER_CELL,
        "must have exactly {FIELD_ELEMENTS_PER_CELL} scalars to serialize to a cell"
    );

    let mut bytes = Vec::with_capacity(FIELD_ELEMENTS_PER_CELL * BYTES_PER_FIELD_ELEMENT);
    for scalar in scalars {
        bytes.extend_from_slice(&scalar.to_bytes_be());
    }
    bytes
}

/// Serializes a list of coset evaluations into the fixed-size array of cells
/// that make up an extended blob.
pub(crate) fn serialize_cells(coset_evaluations: &[Vec<Scalar>]) -> [Cell; CELLS_PER_EXT_BLOB] {
    let cells: Vec<Cell> = coset_evaluations
        .iter()
        .map(|coset_evals| {
            let bytes = serialize_scalars_to_cell(coset_evals);
            let boxed_bytes: Box<[u8]> = bytes.into_boxed_slice();
            let boxed_array: Box<[u8; BYTES_PER_CELL]> = boxed_bytes
                .try_into()
                .expect("expected a cell to be made up of exactly BYTES_PER_CELL bytes");
            boxed_array
        })
        .collect();

    cells
        .try_into()
        .unwrap_or_else(|_| panic!("expected exactly CELLS_PER_EXT_BLOB cosets"))
}

/// Serializes the coset evaluations and their corresponding opening proofs into
/// the fixed-size arrays returned to callers of `compute_cells_and_kzg_proofs`.
pub(crate) fn serialize_cells_and_proofs(
    coset_evaluations: &[Vec<Scalar>],
    proofs: &[G1Point],
) -> ([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]) {
    let cells = serialize_cells(coset_evaluations);

    let proofs: Vec<KZGProof> = proofs.iter().map(serialize_g1_compressed).collect();
    let proofs: [KZGProof; CELLS_PER_EXT_BLOB] = proofs
        .try_into()
        .unwrap_or_else(|_| panic!("expected exactly CELLS_PER_EXT_BLOB proofs"));

    (cells, proofs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIELD_ELEMENTS_PER_BLOB;
    use bls12_381::group::Group;
    use bls12_381::G1Projective;

    fn random_scalar() -> Scalar {
        use bls12_381::ff::Field;
        Scalar::random(&mut rand::thread_rng())
    }

    fn scalar_bytes(scalar: &Scalar) -> [u8; BYTES_PER_FIELD_ELEMENT] {
        scalar.to_bytes_be()
    }

    fn valid_blob() -> Vec<u8> {
        (0..FIELD_ELEMENTS_PER_BLOB)
            .flat_map(|_| scalar_bytes(&random_scalar()))
            .collect()
    }

    fn valid_cell() -> Vec<u8> {
        (0..FIELD_ELEMENTS_PER_CELL)
            .flat_map(|_| scalar_bytes(&random_scalar()))
            .collect()
    }

    #[test]
    fn test_deserialize_scalar_valid() {
        let scalar = random_scalar();
        let bytes = scalar_bytes(&scalar);
        let got = deserialize_bytes_to_scalar(&bytes).unwrap();
        assert_eq!(got, scalar);
    }

    #[test]
    fn test_deserialize_blob_to_scalars_valid() {
        let blob = valid_blob();
        let scalars = deserialize_blob_to_scalars(&blob).unwrap();
        assert_eq!(scalars.len(), FIELD_ELEMENTS_PER_BLOB);
    }

    #[test]
    fn test_deserialize_blob_to_scalars_invalid_length() {
        let blob = valid_blob();
        let got = deserialize_blob_to_scalars(&blob[..blob.len() - 1]);
        assert!(matches!(
            got,
            Err(SerializationError::BlobHasInvalidLength { .. })
        ));
    }

    #[test]
    fn test_deserialize_cell_to_scalars_valid() {
        let cell = valid_cell();
        let scalars = deserialize_cell_to_scalars(&cell).unwrap();
        assert_eq!(scalars.len(), FIELD_ELEMENTS_PER_CELL);
    }

    #[test]
    fn test_serialize_scalars_to_cell_and_back() {
        let scalars: Vec<Scalar> = (0..FIELD_ELEMENTS_PER_CELL).map(|_| random_scalar()).collect();
        let bytes = serialize_scalars_to_cell(&scalars);
        let round_tripped = deserialize_cell_to_scalars(&bytes).unwrap();
        assert_eq!(scalars, round_tripped);
    }

    #[test]
    fn test_serialize_deserialize_g1_point() {
        let point: G1Point = (G1Projective::generator() * random_scalar()).into();
        let compressed = serialize_g1_compressed(&point);
        let got = deserialize_compressed_g1(&compressed).unwrap();
        assert_eq!(got, point);
    }

    #[test]
    fn test_deserialize_compressed_g1_invalid_length() {
        let bytes = vec![0u8; BYTES_PER_G1_POINT - 1];
        let got = deserialize_compressed_g1(&bytes);
        assert!(matches!(
            got,
            Err(SerializationError::G1PointHasInvalidLength { .. })
        ));
    }

    #[test]
    fn test_serialize_cells_and_proofs() {
        let coset_evaluations: Vec<Vec<Scalar>> = (0..CELLS_PER_EXT_BLOB)
            .map(|_| (0..FIELD_ELEMENTS_PER_CELL).map(|_| random_scalar()).collect())
            .collect();
        let proofs: Vec<G1Point> = (0..CELLS_PER_EXT_BLOB)
            .map(|_| (G1Projective::generator() * random_scalar()).into())
            .collect();

        let (cells, serialized_proofs) = serialize_cells_and_proofs(&coset_evaluations, &proofs);

        for (cell, coset_eval) in cells.iter().zip(&coset_evaluations) {
            let round_tripped = deserialize_cell_to_scalars(cell.as_slice()).unwrap();
            assert_eq!(&round_tripped, coset_eval);
        }
        for (proof_bytes, proof) in serialized_proofs.iter().zip(&proofs) {
            let round_tripped = deserialize_compressed_g1(proof_bytes).unwrap();
            assert_eq!(&round_tripped, proof);
        }
    }
}
