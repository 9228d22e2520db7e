#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod matrix {
    pub mod matrix;
    pub mod vector;
}
pub mod rings {
    pub mod fraction;
    pub mod scalar;
}
pub mod solver {
    pub mod constants;
    pub mod echelon;
    pub mod inverse;
    pub mod pivots;
    pub mod rearrange;
    pub mod solve;
}

#[cfg(feature = "python")]
pub mod python;

pub use error::{Error, Result};
pub use matrix::matrix::{LinearSystem, Matrix, Transposed};
pub use matrix::vector::Vector;
pub use rings::fraction::Fraction;
pub use rings::scalar::Scalar;
pub use solver::echelon::{ref_form, rref};
pub use solver::inverse::inverse;
pub use solver::pivots::{
    get_pivots, is_in_echelon_form, is_in_reduced_echelon_form, is_inconsistent, Pivots,
};
pub use solver::rearrange::rearrange;
pub use solver::solve::{find_solutions, find_solutions_for};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn linsys(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMatrix>()?;
    Ok(())
}
