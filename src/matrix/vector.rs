use itertools::Itertools;
use num_traits::Float;
use std::fmt;
use std::ops;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;

/// Fixed-length row or column of scalars. The length is set at construction
/// and no operation resizes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    cells: Vec<T>,
}

#[macro_export]
macro_rules! vector {
    ($($x:expr),* $(,)?) => {
        $crate::matrix::vector::Vector::from_list(vec![$($x),*])
    };
}

impl<T> Vector<T> {
    pub fn from_list(cells: Vec<T>) -> Self {
        Vector { cells }
    }

    pub fn to_list(self) -> Vec<T> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn at(&self, i: usize) -> Result<&T> {
        let len = self.len();
        self.cells
            .get(i)
            .ok_or(Error::IndexOutOfRange { index: i, len })
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        let len = self.len();
        self.cells
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn back(&self) -> Option<&T> {
        self.cells.last()
    }
}

impl<T: Scalar> Vector<T> {
    pub fn zeros(len: usize) -> Self {
        Vector {
            cells: vec![T::zero(); len],
        }
    }

    pub fn dot(&self, rhs: &Vector<T>) -> Result<T> {
        self.check_len(rhs)?;
        Ok(self
            .cells
            .iter()
            .zip(rhs.cells.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }

    /// Row vector (1 x n) view of the vector.
    pub fn t(&self) -> Matrix<T> {
        Matrix::from_parts(1, self.len(), vec![self.clone()])
    }

    /// Row vector times matrix.
    pub fn mul_matrix(&self, rhs: &Matrix<T>) -> Result<Vector<T>> {
        if self.len() != rhs.rows() {
            return Err(Error::shape(
                format!("vector of length {}", rhs.rows()),
                format!("length {}", self.len()),
            ));
        }
        rhs.col_vectors().iter().map(|col| self.dot(col)).collect()
    }

    fn check_len(&self, rhs: &Vector<T>) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(Error::shape(
                format!("vector of length {}", self.len()),
                format!("length {}", rhs.len()),
            ));
        }
        Ok(())
    }
}

impl<T: Scalar + Float> Vector<T> {
    pub fn length(&self) -> T {
        self.cells
            .iter()
            .fold(T::zero(), |acc, x| acc + *x * *x)
            .sqrt()
    }

    pub fn dist(&self, rhs: &Vector<T>) -> Result<T> {
        Ok((self - rhs)?.length())
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.cells[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.cells[i]
    }
}

impl<T: Scalar> ops::Add<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn add(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        self.check_len(rhs)?;
        Ok(self
            .cells
            .iter()
            .zip(rhs.cells.iter())
            .map(|(a, b)| a.clone() + b.clone())
            .collect())
    }
}

impl<T: Scalar> ops::Sub<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn sub(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        self.check_len(rhs)?;
        Ok(self
            .cells
            .iter()
            .zip(rhs.cells.iter())
            .map(|(a, b)| a.clone() - b.clone())
            .collect())
    }
}

impl<T: Scalar> ops::Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, scalar: T) -> Vector<T> {
        self.cells
            .iter()
            .map(|x| scalar.clone() * x.clone())
            .collect()
    }
}

impl<T: Scalar> ops::Div<T> for &Vector<T> {
    type Output = Vector<T>;

    fn div(self, scalar: T) -> Vector<T> {
        self.cells
            .iter()
            .map(|x| x.clone() / scalar.clone())
            .collect()
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cells.iter().join(", "))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
