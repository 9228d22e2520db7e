use itertools::Itertools;

use crate::matrix::matrix::LinearSystem;
use crate::matrix::vector::Vector;
use crate::rings::scalar::Scalar;
use crate::solver::pivots::unknowns;

/// Zeros among the leading half (rounded up) of the coefficient columns.
fn leading_zeros<T: Scalar>(row: &Vector<T>, unknowns: usize) -> usize {
    row.iter()
        .take(unknowns.div_ceil(2))
        .filter(|x| x.is_zero())
        .count()
}

/// Stable sort of the rows by ascending [`leading_zeros`], so rows that are
/// dense on the left move up. Ties keep their relative order.
pub fn rearrange<T: Scalar>(system: LinearSystem<T>) -> LinearSystem<T> {
    rearrange_from(system, 0)
}

/// Same as [`rearrange`], leaving the rows above `start` in place.
pub(crate) fn rearrange_from<T: Scalar>(system: LinearSystem<T>, start: usize) -> LinearSystem<T> {
    let n = unknowns(&system);
    let start = start.min(system.rows());
    let order: Vec<usize> = (0..start)
        .chain((start..system.rows()).sorted_by_key(|&i| leading_zeros(&system[i], n)))
        .collect();
    system.permute_rows(&order)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
