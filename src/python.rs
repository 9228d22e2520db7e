use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::error::Error;
use crate::matrix::matrix::Matrix;

impl From<Error> for PyErr {
    fn from(error: Error) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// `Matrix` over `f64` for Python. Solving treats the last column as the
/// right-hand side.
#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct PyMatrix {
    inner: Matrix<f64>,
}

impl From<Matrix<f64>> for PyMatrix {
    fn from(inner: Matrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

#[pymethods]
impl PyMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::from_list(lines)?.into())
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    pub fn __add__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        match &self.inner + &rhs.inner {
            Ok(result) => Ok(result.into()),
            Err(error) => Err(error.into()),
        }
    }

    pub fn __mul__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        match &self.inner * &rhs.inner {
            Ok(result) => Ok(result.into()),
            Err(error) => Err(error.into()),
        }
    }

    #[getter]
    pub fn T(&self) -> PyMatrix {
        self.inner.transpose().into_matrix().into()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    pub fn ref_form(&self) -> PyMatrix {
        self.inner.ref_form().into()
    }

    #[pyo3(signature = (identity = true))]
    pub fn rref(&self, identity: bool) -> PyMatrix {
        self.inner.rref(identity).into()
    }

    /// `None` when inconsistent, else one value per unknown (`None` if free).
    pub fn solve(&self) -> PyResult<Option<Vec<Option<f64>>>> {
        Ok(self.inner.solve()?.map(|solution| solution.into_vec()))
    }

    pub fn inverse(&self) -> PyResult<Option<PyMatrix>> {
        Ok(self.inner.inverse()?.map(PyMatrix::from))
    }

    pub fn det(&self) -> PyResult<f64> {
        Ok(self.inner.det()?)
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix({:?})", self.inner.to_list())
    }
}
