use bls12_381::Scalar;

/// A Toeplitz matrix is a matrix in which each descending diagonal from left to right is constant.
///
/// Due to the constant diagonal property, a Toeplitz matrix is fully determined by its first row
/// and first column, which is the representation used here.
#[derive(Debug, Clone)]
pub struct ToeplitzMatrix {
    /// The first row of the matrix.
    row: Vec<Scalar>,
    /// The first column of the matrix, including the first element
    /// (even though it is already present in `row`).
    col: Vec<Scalar>,
}

impl ToeplitzMatrix {
    /// Constructs a Toeplitz matrix from its first row and column.
    ///
    /// # Panics
    /// Panics if either `row` or `col` is empty, or if `row[0] != col[0]`.
    pub fn new(row: Vec<Scalar>, col: Vec<Scalar>) -> Self {
        assert!(
            !row.is_empty() && !col.is_empty(),
            "row and col must be non-empty"
        );
        assert_eq!(
            row[0], col[0],
            "Toeplitz matrix must satisfy row[0] == col[0] (shared top-left entry)"
        );
        Self { row, col }
    }
}

/// A circulant matrix is a special kind of Toeplitz matrix where each row is a cyclic
/// right-shift of the row above it. It is fully determined by its first row, and is
/// diagonalized by the Fourier transform, which is what makes Toeplitz-vector products
/// efficient to compute via FFT.
#[derive(Debug, Clone)]
pub(crate) struct CirculantMatrix {
    pub(crate) row: Vec<Scalar>,
}

impl CirculantMatrix {
    /// Embeds a Toeplitz matrix into a circulant matrix of twice its dimension.
    pub(crate) fn from_toeplitz(tm: ToeplitzMatrix) -> Self {
        let mut extension_col = tm.row;
        extension_col.rotate_left(1);
        extension_col.reverse();

        Self {
            row: [tm.col, extension_col].concat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bls12_381::{ff::Field, G1Projective, Scalar};

    use super::*;

    impl ToeplitzMatrix {
        fn vector_mul_scalars(self, vector: Vec<Scalar>) -> Vec<Scalar> {
            let n = vector.len();
            assert_eq!(vector.len(), self.col.len());
            let cm = CirculantMatrix::from_toeplitz(self);
            let circulant_result = cm.vector_mul_scalar(vector);

            circulant_result.into_iter().take(n).collect()
        }

        pub(crate) fn vector_mul_g1(self, vector: Vec<G1Projective>) -> Vec<G1Projective> {
            let n = vector.len();
            let cm = CirculantMatrix::from_toeplitz(self);
            let circulant_result = cm.vector_mul_g1(vector);

            circulant_result.into_iter().take(n).collect()
        }
    }

    impl CirculantMatrix {
        /// Performs an efficient multiplication of the circulant matrix with a vector of
        /// scalars using FFT. See https://www.johndcook.com/blog/2023/05/12/circulant-matrices/
        fn vector_mul_scalar(self, vector: Vec<Scalar>) -> Vec<Scalar> {
            let domain = polynomial::domain::Domain::new(vector.len() * 2);
            let m_fft = domain.fft_scalars(vector);
            let col_fft = domain.fft_scalars(self.row);

            let mut evaluations = Vec::new();
            for (a, b) in m_fft.into_iter().zip(col_fft) {
                evaluations.push(a * b);
            }

            domain.ifft_scalars(evaluations)
        }

        /// Performs an efficient multiplication of the circulant matrix with a vector of
        /// G1 points using FFT.
        fn vector_mul_g1(self, vector: Vec<G1Projective>) -> Vec<G1Projective> {
            assert!(vector.len().is_power_of_two());

            let domain = polynomial::domain::Domain::new(vector.len() * 2);
            let m_fft = domain.fft_g1(vector);
            let col_fft = domain.fft_scalars(self.row);

            let mut evaluations = Vec::new();
            for (a, b) in m_fft.into_iter().zip(col_fft) {
                evaluations.push(a * b);
            }
            domain.ifft_g1(evaluations)
        }
    }

    /// Stores a matrix as a vector of rows. Test-only.
    #[derive(Debug, Clone)]
    struct DenseMatrix {
        inner: Vec<Vec<Scalar>>,
    }

    impl DenseMatrix {
        fn from_toeplitz(toeplitz: &ToeplitzMatrix) -> Self {
            let rows = toeplitz.col.len();
            let cols = toeplitz.row.len();
            let mut matrix = vec![vec![Scalar::ZERO; toeplitz.col.len()]; toeplitz.row.len()];

            for (i, r) in matrix.iter_mut().enumerate().take(rows) {
                for (j, rc) in r.iter_mut().enumerate().take(cols) {
                    if i <= j {
                        *rc = toeplitz.row[j - i];
                    } else {
                        *rc = toeplitz.col[i - j];
                    }
                }
            }

            Self { inner: matrix }
        }

        fn vector_mul_scalar(self, vector: &[Scalar]) -> Vec<Scalar> {
            fn inner_product(lhs: &[Scalar], rhs: &[Scalar]) -> Scalar {
                lhs.iter().zip(rhs).map(|(a, b)| a * b).sum()
            }

            self.vector_mul(vector, inner_product)
        }

        fn vector_mul<T>(
            self,
            vector: &[T],
            inner_product: fn(lhs: &[T], rhs: &[Scalar]) -> T,
        ) -> Vec<T> {
            let row_length = self.inner[0].len();
            assert_eq!(
                row_length,
                vector.len(),
                "Matrix row and vector length do not match, matrix: {}, vector: {}",
                row_length,
                vector.len()
            );

            self.inner
                .into_iter()
                .map(|row| inner_product(vector, &row))
                .collect()
        }
    }

    fn is_toeplitz(dense_matrix: &DenseMatrix) -> bool {
        let num_rows = dense_matrix.inner.len();
        if num_rows == 0 || dense_matrix.inner[0].is_empty() {
            return false;
        }

        let num_cols = dense_matrix.inner[0].len();
        for i in 0..num_rows - 1 {
            for j in 0..num_cols - 1 {
                if dense_matrix.inner[i][j] != dense_matrix.inner[i + 1][j + 1] {
                    return false;
                }
            }
        }

        true
    }

    #[test]
    fn smoke_test_check_dense_toeplitz_matrix_construction() {
        let col = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64)];
        let row = vec![Scalar::from(1u64), Scalar::from(5u64), Scalar::from(6u64)];

        let tm = ToeplitzMatrix::new(col, row);
        let mut dm = DenseMatrix::from_toeplitz(&tm);
        assert!(
            is_toeplitz(&dm),
            "dense matrix should represent a toeplitz matrix"
        );

        dm.inner[0][0] = Scalar::from(2u64);
        assert!(
            !is_toeplitz(&dm),
            "dense matrix should not represent a toeplitz matrix"
        );
    }

    #[test]
    fn smoke_test_dense_matrix_vector_mul() {
        let col = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64)];
        let row = vec![Scalar::from(1u64), Scalar::from(5u64), Scalar::from(6u64)];

        let tm = ToeplitzMatrix::new(row, col);
        let dm = DenseMatrix::from_toeplitz(&tm);

        let vector = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64)];
        let expected = vec![
            Scalar::from(29u64),
            Scalar::from(19u64),
            Scalar::from(10u64),
        ];
        let got = dm.vector_mul_scalar(&vector);
        assert_eq!(got, expected);
    }

    #[test]
    fn smoke_test_circulant_matrix() {
        let col = vec![
            Scalar::from(1u64),
            Scalar::from(2u64),
            Scalar::from(3u64),
            Scalar::from(4u64),
        ];
        let row = vec![
            Scalar::from(1u64),
            Scalar::from(5u64),
            Scalar::from(6u64),
            Scalar::from(7u64),
        ];

        let tm = ToeplitzMatrix::new(col, row);
        let dm = DenseMatrix::from_toeplitz(&tm);

        let vector = vec![
            Scalar::from(1u64),
            Scalar::from(2u64),
            Scalar::from(3u64),
            Scalar::from(4u64),
        ];
        let got = tm.vector_mul_scalars(vector.clone());
        let expected = dm.vector_mul_scalar(&vector);
        assert_eq!(got, expected);
    }

    #[test]
    #[should_panic]
    fn toeplitz_matrix_panics_on_mismatched_top_left() {
        let row = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let col = vec![Scalar::from(9u64), Scalar::from(3u64)];
        let _ = ToeplitzMatrix::new(row, col);
    }
}
