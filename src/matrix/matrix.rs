use itertools::Itertools;
use std::fmt;
use std::ops;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::matrix::vector::Vector;
use crate::rings::scalar::Scalar;

/// Dense `rows x cols` matrix stored as a list of [`Vector`] rows.
///
/// Every row has exactly `cols` entries. Constructors reject ragged input and
/// the only ways to mutate a row keep its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Vector<T>>,
}

/// A matrix whose last column is the right-hand side of the equations.
pub type LinearSystem<T> = Matrix<T>;

/// Result of transposing: a matrix with a single column transposes to a
/// single row, which is handed back as a plain [`Vector`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transposed<T> {
    Vector(Vector<T>),
    Matrix(Matrix<T>),
}

#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)?]),* $(,)?) => {
        $crate::matrix::matrix::Matrix::from_list(vec![$(vec![$($x),*]),*])
    };
}

impl<T> Matrix<T> {
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        Matrix::from_row_vectors(lines.into_iter().map(Vector::from_list).collect())
    }

    pub fn from_row_vectors(rows: Vec<Vector<T>>) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|r| r.len() != cols) {
            return Err(Error::shape(
                format!("rows of length {}", cols),
                format!("a row of length {}", ragged.len()),
            ));
        }
        Ok(Matrix::from_parts(rows.len(), cols, rows))
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Vector<T>>) -> Self {
        debug_assert_eq!(cells.len(), rows);
        debug_assert!(cells.iter().all(|r| r.len() == cols));
        Matrix { rows, cols, cells }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn row(&self, i: usize) -> Result<&Vector<T>> {
        self.cells.get(i).ok_or(Error::IndexOutOfRange {
            index: i,
            len: self.rows,
        })
    }

    pub fn at(&self, row: usize, col: usize) -> Result<&T> {
        self.row(row)?.at(col)
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        let len = self.rows;
        self.cells
            .get_mut(row)
            .ok_or(Error::IndexOutOfRange { index: row, len })?
            .at_mut(col)
    }

    pub fn row_vectors(&self) -> &[Vector<T>] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector<T>> {
        self.cells.iter()
    }

    /// Replaces row `i`, which must keep the matrix width.
    pub fn set_row(&mut self, i: usize, row: Vector<T>) -> Result<()> {
        if row.len() != self.cols {
            return Err(Error::shape(
                format!("row of length {}", self.cols),
                format!("length {}", row.len()),
            ));
        }
        let len = self.rows;
        *self
            .cells
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len })? = row;
        Ok(())
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    pub(crate) fn replace_row(&mut self, i: usize, row: Vector<T>) {
        debug_assert_eq!(row.len(), self.cols);
        self.cells[i] = row;
    }

    /// Reorders the rows so that row `i` of the result is row `order[i]` of `self`.
    pub(crate) fn permute_rows(self, order: &[usize]) -> Self {
        debug_assert_eq!(order.len(), self.rows);
        let mut slots: Vec<Option<Vector<T>>> = self.cells.into_iter().map(Some).collect();
        let cells = order
            .iter()
            .filter_map(|&src| slots[src].take())
            .collect::<Vec<_>>();
        Matrix::from_parts(self.rows, self.cols, cells)
    }
}

impl<T: Clone> Matrix<T> {
    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells
            .iter()
            .map(|row| row.as_slice().to_vec())
            .collect()
    }
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::from_parts(rows, cols, vec![Vector::zeros(cols); rows])
    }

    pub fn identity(n: usize) -> Self {
        Matrix::from_parts(
            n,
            n,
            (0..n)
                .map(|i| {
                    (0..n)
                        .map(|j| if i == j { T::one() } else { T::zero() })
                        .collect()
                })
                .collect(),
        )
    }

    pub fn col_vectors(&self) -> Vec<Vector<T>> {
        (0..self.cols)
            .map(|c| self.cells.iter().map(|row| row[c].clone()).collect())
            .collect()
    }

    pub fn from_col_vectors(cols: Vec<Vector<T>>) -> Result<Self> {
        let rows = cols.first().map(|c| c.len()).unwrap_or(0);
        if let Some(ragged) = cols.iter().find(|c| c.len() != rows) {
            return Err(Error::shape(
                format!("columns of length {}", rows),
                format!("a column of length {}", ragged.len()),
            ));
        }
        let width = cols.len();
        Ok(Matrix::from_parts(
            rows,
            width,
            (0..rows)
                .map(|r| cols.iter().map(|col| col[r].clone()).collect())
                .collect(),
        ))
    }

    pub fn transpose(&self) -> Transposed<T> {
        if self.cols == 1 {
            return Transposed::Vector(self.cells.iter().map(|row| row[0].clone()).collect());
        }
        Transposed::Matrix(Matrix::from_parts(self.cols, self.rows, self.col_vectors()))
    }

    /// `[self | other]`: the columns of `other` appended on the right.
    pub fn augment(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.rows != other.rows {
            return Err(Error::shape(
                format!("{} rows", self.rows),
                format!("{} rows", other.rows),
            ));
        }
        Ok(Matrix::from_parts(
            self.rows,
            self.cols + other.cols,
            self.cells
                .iter()
                .zip(other.cells.iter())
                .map(|(a, b)| a.iter().chain(b.iter()).cloned().collect())
                .collect(),
        ))
    }

    /// `[self | b]`: builds the augmented system of `self * x = b`.
    pub fn augment_vector(&self, b: &Vector<T>) -> Result<LinearSystem<T>> {
        if self.rows != b.len() {
            return Err(Error::shape(
                format!("vector of length {}", self.rows),
                format!("length {}", b.len()),
            ));
        }
        Ok(Matrix::from_parts(
            self.rows,
            self.cols + 1,
            self.cells
                .iter()
                .zip(b.iter())
                .map(|(row, x)| row.iter().chain(std::iter::once(x)).cloned().collect())
                .collect(),
        ))
    }

    /// Linear combination of the columns of `self`, weighted by `vec`.
    pub fn mul_vector(&self, vec: &Vector<T>) -> Result<Vector<T>> {
        if self.cols != vec.len() {
            return Err(Error::shape(
                format!("vector of length {}", self.cols),
                format!("length {}", vec.len()),
            ));
        }
        self.col_vectors()
            .iter()
            .zip(vec.iter())
            .map(|(col, x)| col * x.clone())
            .try_fold(Vector::zeros(self.rows), |acc, col| &acc + &col)
    }

    pub fn det(&self) -> Result<T> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        match self.rows {
            0 => Ok(T::one()),
            1 => Ok(self[(0, 0)].clone()),
            2 => Ok(self.det2x2()),
            _ => self.cofactor(),
        }
    }

    /// Minor obtained by dropping row `i` and/or column `j`.
    pub fn subset(&self, i: Option<usize>, j: Option<usize>) -> Result<Matrix<T>> {
        if let Some(i) = i.filter(|&i| i >= self.rows) {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: self.rows,
            });
        }
        if let Some(j) = j.filter(|&j| j >= self.cols) {
            return Err(Error::IndexOutOfRange {
                index: j,
                len: self.cols,
            });
        }

        let cells: Vec<Vector<T>> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(k, _)| Some(*k) != i)
            .map(|(_, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(z, _)| Some(*z) != j)
                    .map(|(_, x)| x.clone())
                    .collect()
            })
            .collect();
        let cols = self.cols - usize::from(j.is_some());
        Ok(Matrix::from_parts(cells.len(), cols, cells))
    }

    /// `ad - bc`, exactly zero when the two products only differ by rounding.
    fn det2x2(&self) -> T {
        let ad = self[(0, 0)].clone() * self[(1, 1)].clone();
        ad.sub_snapped(self[(0, 1)].clone() * self[(1, 0)].clone())
    }

    /// Expands along whichever row or column holds the most zeros.
    fn cofactor(&self) -> Result<T> {
        let zeros = |line: &Vector<T>| line.iter().filter(|x| x.is_zero()).count();

        let (row_pos, row_zeros) = self
            .cells
            .iter()
            .map(zeros)
            .enumerate()
            .max_by_key(|&(pos, count)| (count, std::cmp::Reverse(pos)))
            .unwrap_or((0, 0));
        let (col_pos, col_zeros) = self
            .col_vectors()
            .iter()
            .map(zeros)
            .enumerate()
            .max_by_key(|&(pos, count)| (count, std::cmp::Reverse(pos)))
            .unwrap_or((0, 0));

        let positions: Vec<(usize, usize)> = if col_zeros >= row_zeros {
            (0..self.rows).map(|i| (i, col_pos)).collect()
        } else {
            (0..self.cols).map(|j| (row_pos, j)).collect()
        };

        positions
            .into_iter()
            .try_fold(T::zero(), |acc, (i, j)| -> Result<T> {
                Ok(acc + self.cofactor_term(i, j)?)
            })
    }

    fn cofactor_term(&self, i: usize, j: usize) -> Result<T> {
        let a = self[(i, j)].clone();
        if a.is_zero() {
            return Ok(T::zero());
        }
        let minor = self.subset(Some(i), Some(j))?.det()?;
        let term = a * minor;
        Ok(if (i + j) % 2 == 0 {
            term
        } else {
            T::zero() - term
        })
    }

    /// Matrix product, assembled column by column from `self * column`.
    fn mul_by_columns(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        let columns = rhs
            .col_vectors()
            .iter()
            .map(|col| self.mul_vector(col))
            .collect::<Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Ok(Matrix::zeros(self.rows, 0));
        }
        Matrix::from_col_vectors(columns)
    }
}

impl<T: Scalar> Transposed<T> {
    /// The transpose as a matrix, a collapsed row becoming a `1 x n` matrix.
    pub fn into_matrix(self) -> Matrix<T> {
        match self {
            Transposed::Vector(v) => v.t(),
            Transposed::Matrix(m) => m,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[row][col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.cells[row][col]
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = Vector<T>;

    fn index(&self, row: usize) -> &Vector<T> {
        &self.cells[row]
    }
}

impl<T: Scalar> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.shape() != rhs.shape() {
            return Err(Error::shape(
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", rhs.rows, rhs.cols),
            ));
        }
        let cells = self
            .cells
            .iter()
            .zip(rhs.cells.iter())
            .map(|(a, b)| a + b)
            .collect::<Result<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, cells))
    }
}

impl<T: Scalar> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.shape() != rhs.shape() {
            return Err(Error::shape(
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", rhs.rows, rhs.cols),
            ));
        }
        let cells = self
            .cells
            .iter()
            .zip(rhs.cells.iter())
            .map(|(a, b)| a - b)
            .collect::<Result<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, cells))
    }
}

impl<T: Scalar> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(Error::shape(
                format!("{} rows", self.cols),
                format!("{} rows", rhs.rows),
            ));
        }
        self.mul_by_columns(rhs)
    }
}

impl<T: Scalar> ops::Mul<&Vector<T>> for &Matrix<T> {
    type Output = Result<Vector<T>>;

    fn mul(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        self.mul_vector(rhs)
    }
}

impl<T: Scalar> ops::Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, scalar: T) -> Matrix<T> {
        Matrix::from_parts(
            self.rows,
            self.cols,
            self.cells.iter().map(|row| row * scalar.clone()).collect(),
        )
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.iter().join("\n"))
    }
}

impl<T: fmt::Display> fmt::Display for Transposed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transposed::Vector(v) => write!(f, "{}", v),
            Transposed::Matrix(m) => write!(f, "{}", m),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;
    use crate::vector;

    fn fr(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    fn ints(rows: &[&[i64]]) -> Matrix<Fraction> {
        Matrix::from_list(
            rows.iter()
                .map(|row| row.iter().map(|&x| Fraction::from(x)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_matrix_construction() {
        let m = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(*m.at(1, 2).unwrap(), 6.0);
        assert_eq!(m.at(2, 0), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(m.at(0, 3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert!(matches!(
            matrix![[1.0, 2.0], [3.0]],
            Err(Error::DimensionMismatch { .. })
        ));

        let mut m = m;
        assert!(m.set_row(0, vector![1.0]).is_err());
        m.set_row(0, vector![7.0, 8.0, 9.0]).unwrap();
        *m.at_mut(1, 0).unwrap() = -4.0;
        assert_eq!(m.to_list(), vec![vec![7.0, 8.0, 9.0], vec![-4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_matrix_identity_and_columns() {
        let id = Matrix::<f64>::identity(3);
        assert_eq!(
            id.to_list(),
            vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]
        );
        let m = matrix![[1.0, 2.0], [3.0, 4.0]].unwrap();
        let cols = m.col_vectors();
        assert_eq!(cols, vec![vector![1.0, 3.0], vector![2.0, 4.0]]);
        assert_eq!(Matrix::from_col_vectors(cols).unwrap(), m);
    }

    #[test]
    fn test_matrix_transpose() {
        let m = ints(&[&[1, 2, 5, 77], &[3, 4, 7, 11], &[4, 8, 9, 1]]);
        match m.transpose() {
            Transposed::Matrix(t) => assert_eq!(
                t,
                ints(&[&[1, 3, 4], &[2, 4, 8], &[5, 7, 9], &[77, 11, 1]])
            ),
            Transposed::Vector(_) => panic!("a 3x4 matrix does not collapse"),
        }

        let column = matrix![[1.0], [2.0], [3.0]].unwrap();
        match column.transpose() {
            Transposed::Vector(v) => assert_eq!(v, vector![1.0, 2.0, 3.0]),
            Transposed::Matrix(_) => panic!("a single column collapses to a vector"),
        }
        assert_eq!(column.transpose().into_matrix().shape(), (1, 3));
    }

    #[test]
    fn test_matrix_augment() {
        let a = matrix![[1.0, -2.0, 1.0], [0.0, 2.0, -8.0], [5.0, 0.0, -5.0]].unwrap();
        let b = vector![0.0, 8.0, 10.0];
        let sys = a.augment_vector(&b).unwrap();
        assert_eq!(sys.shape(), (3, 4));
        assert_eq!(sys.row(1).unwrap(), &vector![0.0, 2.0, -8.0, 8.0]);

        let wide = a.augment(&Matrix::identity(3)).unwrap();
        assert_eq!(wide.shape(), (3, 6));
        assert_eq!(wide.row(2).unwrap(), &vector![5.0, 0.0, -5.0, 0.0, 0.0, 1.0]);

        assert!(a.augment_vector(&vector![1.0]).is_err());
        assert!(a.augment(&Matrix::identity(2)).is_err());
    }

    #[test]
    fn test_matrix_mul() {
        let a = matrix![[5.0, 1.0], [3.0, -2.0]].unwrap();
        let b = matrix![[2.0, 0.0], [4.0, 3.0]].unwrap();
        assert_eq!(
            (&a * &b).unwrap().to_list(),
            vec![vec![14.0, 3.0], vec![-2.0, -6.0]]
        );
        assert_eq!(
            (&b * &a).unwrap().to_list(),
            vec![vec![10.0, 2.0], vec![29.0, -2.0]]
        );

        let m1 = matrix![[2.0, 3.0], [1.0, -5.0]].unwrap();
        let m2 = matrix![[4.0, 3.0, 6.0], [1.0, -2.0, 3.0]].unwrap();
        assert_eq!(
            (&m1 * &m2).unwrap().to_list(),
            vec![vec![11.0, 0.0, 21.0], vec![-1.0, 13.0, -9.0]]
        );
        assert!((&m2 * &m1).is_err());

        let sys = matrix![[1.0, -2.0, 1.0], [0.0, 2.0, -8.0], [5.0, 0.0, -5.0]].unwrap();
        assert_eq!(
            (&sys * &vector![1.0, 0.0, -1.0]).unwrap(),
            vector![0.0, 8.0, 10.0]
        );
    }

    #[test]
    fn test_matrix_add_sub_scale() {
        let shear = matrix![[1.0, 2.0], [0.0, 1.0]].unwrap();
        let reflect = matrix![[-1.0, 0.0], [0.0, 1.0]].unwrap();
        assert_eq!(
            (&shear + &reflect).unwrap().to_list(),
            vec![vec![0.0, 2.0], vec![0.0, 2.0]]
        );
        assert_eq!(
            (&shear - &reflect).unwrap().to_list(),
            vec![vec![2.0, 2.0], vec![0.0, 0.0]]
        );
        assert_eq!(
            (&shear * 2.0).to_list(),
            vec![vec![2.0, 4.0], vec![0.0, 2.0]]
        );
        assert!((&shear + &Matrix::identity(3)).is_err());
    }

    #[test]
    fn test_matrix_det() {
        let a = matrix![[fr("5"), fr("1")], [fr("3"), fr("-2")]].unwrap();
        assert_eq!(a.det().unwrap(), fr("-13"));

        let b = matrix![
            [fr("1"), fr("-2"), fr("1")],
            [fr("0"), fr("2"), fr("-8")],
            [fr("5"), fr("0"), fr("-5")]
        ]
        .unwrap();
        assert_eq!(b.det().unwrap(), fr("60"));

        let symmetric = matrix![[1.0, 2.0, 3.0], [2.0, 4.0, 5.0], [3.0, 5.0, 6.0]].unwrap();
        assert_eq!(symmetric.det().unwrap(), -1.0);

        let singular = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]].unwrap();
        assert_eq!(singular.det().unwrap(), 0.0);

        assert_eq!(
            matrix![[1.0, 2.0, 3.0]].unwrap().det(),
            Err(Error::NotSquare { rows: 1, cols: 3 })
        );
    }

    #[test]
    fn test_matrix_subset() {
        let m = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]].unwrap();
        assert_eq!(
            m.subset(Some(1), Some(0)).unwrap().to_list(),
            vec![vec![2.0, 3.0], vec![8.0, 9.0]]
        );
        assert_eq!(m.subset(None, Some(2)).unwrap().shape(), (3, 2));
        assert!(m.subset(Some(3), None).is_err());
    }

    #[test]
    fn test_matrix_display() {
        let m = matrix![[1, 2], [3, 4]].unwrap();
        assert_eq!(m.to_string(), "[1, 2]\n[3, 4]");
    }
}
