use std::collections::HashSet;

use bls12_381::Scalar;
use erasure_codes::{BlockErasureIndices, ReedSolomon};

use crate::{
    constants::{CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_EXT_BLOB},
    errors::RecoveryError,
    serialization::deserialize_cells,
    CellIndex, CellRef, Error,
};

/// Recovers the polynomial, in coefficient form, given a partial set of cells.
pub(crate) fn recover_polynomial_coeff(
    rs: &ReedSolomon,
    cell_indices: Vec<CellIndex>,
    cells: Vec<CellRef>,
) -> Result<Vec<Scalar>, Error> {
    validation::recover_polynomial_coeff(&cell_indices, &cells)?;

    let coset_evaluations = deserialize_cells(cells)?;
    let missing_cell_indices = find_missing_cell_indices(&cell_indices);

    let coset_indices: Vec<usize> = cell_indices.iter().map(|&index| index as usize).collect();

    let (_, flattened_coset_evaluations_normal_order) = kzg_multi_open::recover_evaluations_in_domain_order(
        FIELD_ELEMENTS_PER_EXT_BLOB,
        coset_indices,
        coset_evaluations,
    )
    .expect("infallible: validation has already checked that the cell indices are non-empty, unique, in range and that the cells all have the same length");

    let poly_coeff = rs.recover_polynomial_coefficient(
        flattened_coset_evaluations_normal_order,
        BlockErasureIndices(missing_cell_indices),
    )?;

    Ok(poly_coeff)
}

/// Given the set of cell indices that were received, return the indices that are missing,
/// relative to the full set of cells that make up an extended blob.
fn find_missing_cell_indices(cell_indices: &[CellIndex]) -> Vec<usize> {
    let received: HashSet<CellIndex> = cell_indices.iter().copied().collect();
    (0..CELLS_PER_EXT_BLOB as u64)
        .filter(|index| !received.contains(index))
        .map(|index| index as usize)
        .collect()
}

mod validation {
    use super::{CellIndex, CellRef, RecoveryError};
    use crate::constants::{BYTES_PER_CELL, CELLS_PER_EXT_BLOB, EXTENSION_FACTOR};
    use std::collections::HashSet;

    pub(super) fn recover_polynomial_coeff(
        cell_indices: &[CellIndex],
        cells: &[CellRef],
    ) -> Result<(), RecoveryError> {
        if cell_indices.len() != cells.len() {
            return Err(RecoveryError::NumCellIndicesNotEqualToNumCells {
                num_cell_indices: cell_indices.len(),
                num_cells: cells.len(),
            });
        }

        for cell_index in cell_indices {
            if *cell_index >= CELLS_PER_EXT_BLOB as u64 {
                return Err(RecoveryError::CellIndexOutOfRange {
                    cell_index: *cell_index,
                    max_number_of_cells: CELLS_PER_EXT_BLOB as u64,
                });
            }
        }

        // Infallible: every `CellRef` is a reference to a `[u8; BYTES_PER_CELL]`.
        for cell in cells {
            assert_eq!(cell.len(), BYTES_PER_CELL);
        }

        if !cell_indices_are_unique(cell_indices) {
            return Err(RecoveryError::CellIndicesNotUnique);
        }

        let min_cells_needed = CELLS_PER_EXT_BLOB / EXTENSION_FACTOR;
        if cells.len() < min_cells_needed {
            return Err(RecoveryError::NotEnoughCellsToReconstruct {
                num_cells_received: cells.len(),
                min_cells_needed,
            });
        }

        if cells.len() > CELLS_PER_EXT_BLOB {
            return Err(RecoveryError::TooManyCellsReceived {
                num_cells_received: cells.len(),
                max_cells_needed: CELLS_PER_EXT_BLOB,
            });
        }

        Ok(())
    }

    fn cell_indices_are_unique(cell_indices: &[CellIndex]) -> bool {
        let len_before = cell_indices.len();
        let unique: HashSet<_> = cell_indices.iter().collect();
        unique.len() == len_before
    }

}
