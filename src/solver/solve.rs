use log::debug;

use crate::error::{Error, Result};
use crate::matrix::matrix::{LinearSystem, Matrix};
use crate::matrix::vector::Vector;
use crate::rings::scalar::Scalar;
use crate::solver::echelon::rref;
use crate::solver::pivots::{is_inconsistent, leading_column, unknowns, Pivots};
use crate::solver::rearrange::rearrange;

impl<T: Scalar> LinearSystem<T> {
    pub fn solve(&self) -> Result<Option<Pivots<T>>> {
        find_solutions(self)
    }
}

/// Solves the augmented system `[A | b]`.
///
/// Returns `Ok(None)` when the system is inconsistent. Otherwise slot `i` of
/// the result holds the value of unknown `i`, or `None` when that unknown is
/// free; the values given are the solution with every free unknown at zero.
pub fn find_solutions<T: Scalar>(system: &LinearSystem<T>) -> Result<Option<Pivots<T>>> {
    if system.cols() == 0 {
        return Err(Error::EmptySystem);
    }

    let reduced = rref(&rearrange(system.clone()), true);
    if is_inconsistent(&reduced) {
        debug!("solve: {}x{} system is inconsistent", system.rows(), system.cols());
        return Ok(None);
    }

    let n = unknowns(&reduced);
    let mut solutions = Pivots::absent(n);
    for var in (0..n).rev() {
        if let Some(row) = pivot_row(&reduced, var) {
            let value = back_substitute(row, var, &solutions);
            solutions.set(var, Some(value))?;
        }
    }

    debug!(
        "solve: {} of {} unknowns determined",
        solutions.count(),
        solutions.len()
    );
    Ok(Some(solutions))
}

/// [`find_solutions`] for `a * x = b`.
pub fn find_solutions_for<T: Scalar>(a: &Matrix<T>, b: &Vector<T>) -> Result<Option<Pivots<T>>> {
    find_solutions(&a.augment_vector(b)?)
}

/// Row whose leading coefficient is in column `var`; looked up at position
/// `var` first, then anywhere.
fn pivot_row<T: Scalar>(reduced: &LinearSystem<T>, var: usize) -> Option<&Vector<T>> {
    let n = unknowns(reduced);
    reduced
        .row(var)
        .ok()
        .filter(|row| leading_column(row, n) == Some(var))
        .or_else(|| reduced.iter().find(|row| leading_column(row, n) == Some(var)))
}

/// `x[var] = (b - sum of the other known terms) / coefficient`.
fn back_substitute<T: Scalar>(row: &Vector<T>, var: usize, known: &Pivots<T>) -> T {
    let rhs = row.iter().take(known.len()).enumerate().fold(
        row.back().cloned().unwrap_or_else(T::zero),
        |acc, (i, coef)| match known.get(i) {
            Some(x) if i != var => acc.sub_snapped(coef.clone() * x.clone()),
            _ => acc,
        },
    );
    rhs / row[var].clone()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
