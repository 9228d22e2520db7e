use log::debug;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;
use crate::solver::echelon::rref;

impl<T: Scalar> Matrix<T> {
    pub fn inverse(&self) -> Result<Option<Matrix<T>>> {
        inverse(self)
    }
}

/// Inverse of a square matrix, `None` when it is singular.
///
/// 1x1 and 2x2 matrices use the closed forms. Larger ones reduce `[A | I]`
/// and read the inverse off the right-hand block.
pub fn inverse<T: Scalar>(matrix: &Matrix<T>) -> Result<Option<Matrix<T>>> {
    if !matrix.is_square() {
        return Err(Error::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let n = matrix.rows();
    match n {
        0 => Ok(Some(Matrix::identity(0))),
        1 => {
            let a = matrix[(0, 0)].clone();
            if a.is_zero() {
                return Ok(None);
            }
            Ok(Some(Matrix::from_list(vec![vec![T::one() / a]])?))
        }
        2 => {
            let det = matrix.det()?;
            if det.is_zero() {
                return Ok(None);
            }
            let adjugate = Matrix::from_list(vec![
                vec![matrix[(1, 1)].clone(), T::zero() - matrix[(0, 1)].clone()],
                vec![T::zero() - matrix[(1, 0)].clone(), matrix[(0, 0)].clone()],
            ])?;
            Ok(Some(&adjugate * (T::one() / det)))
        }
        _ => {
            let reduced = rref(&matrix.augment(&Matrix::identity(n))?, true);
            let mut cols = reduced.col_vectors();
            let right = cols.split_off(n);
            if Matrix::from_col_vectors(cols)? != Matrix::identity(n) {
                debug!("inverse: {}x{} matrix is singular", n, n);
                return Ok(None);
            }
            Ok(Some(Matrix::from_col_vectors(right)?))
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
