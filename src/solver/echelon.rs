//! Row echelon (REF) and reduced row echelon (RREF) forms.
//!
//! Square systems with at most [`SMALL_SQUARE_LIMIT`] unknowns are reduced by
//! repeated sweeps until the positional predicates hold. Everything else goes
//! through a single forward pass (and a backward pass for RREF).
//! Both paths end with the pivot rows aligned: the row leading in column `c`
//! sits at position `c` whenever the system has such a row.

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::matrix::matrix::LinearSystem;
use crate::matrix::vector::Vector;
use crate::rings::scalar::Scalar;
use crate::solver::constants::{MAX_SWEEPS, SMALL_SQUARE_LIMIT};
use crate::solver::pivots::{
    get_pivots, is_in_echelon_form, is_in_reduced_echelon_form, leading_column, unknowns,
};
use crate::solver::rearrange::rearrange_from;

impl<T: Scalar> LinearSystem<T> {
    pub fn ref_form(&self) -> LinearSystem<T> {
        ref_form(self)
    }

    pub fn rref(&self, identity: bool) -> LinearSystem<T> {
        rref(self, identity)
    }
}

/// Row echelon form of `system`. The input is left untouched.
pub fn ref_form<T: Scalar>(system: &LinearSystem<T>) -> LinearSystem<T> {
    let reduced = if is_small_square(system) {
        debug!("ref: {}x{} system, iterative sweeps", system.rows(), system.cols());
        ref_sweeps(system.clone(), MAX_SWEEPS)
    } else {
        debug!("ref: {}x{} system, single pass", system.rows(), system.cols());
        ref_single_pass(system.clone())
    };
    align_pivot_rows(reduced)
}

/// Reduced row echelon form of `system`; with `identity` every pivot is scaled to one.
pub fn rref<T: Scalar>(system: &LinearSystem<T>, identity: bool) -> LinearSystem<T> {
    if is_small_square(system) {
        debug!("rref: {}x{} system, iterative sweeps", system.rows(), system.cols());
        rref_sweeps(system, identity, MAX_SWEEPS)
    } else {
        debug!("rref: {}x{} system, single pass", system.rows(), system.cols());
        rref_single_pass(system.clone(), identity)
    }
}

fn is_small_square<T>(system: &LinearSystem<T>) -> bool {
    let rows = system.rows();
    rows > 0 && rows == unknowns(system) && rows <= SMALL_SQUARE_LIMIT
}

/// Clears column `col` of `target` using `pivot_row`.
///
/// With `m = target[col] / pivot_row[col]` the result is `target - m * pivot_row`,
/// or `m * pivot_row - target` when `flip` is set. Column `col` comes out as
/// an exact zero, and so does every entry that cancels to rounding residue.
fn eliminate<T: Scalar>(
    target: &Vector<T>,
    pivot_row: &Vector<T>,
    col: usize,
    flip: bool,
) -> Vector<T> {
    let m = target[col].clone() / pivot_row[col].clone();
    let mut row: Vector<T> = target
        .iter()
        .zip(pivot_row.iter())
        .map(|(t, p)| {
            let scaled = m.clone() * p.clone();
            if flip {
                scaled.sub_snapped(t.clone())
            } else {
                t.clone().sub_snapped(scaled)
            }
        })
        .collect();
    row[col] = T::zero();
    row
}

/// Divides `row` by its entry in column `col`, which becomes an exact one.
fn normalize<T: Scalar>(row: &Vector<T>, col: usize) -> Vector<T> {
    let mut scaled = row / row[col].clone();
    scaled[col] = T::one();
    scaled
}

/// Leading columns strictly increase from one row to the next and rows
/// without coefficients come last.
fn has_staircase<T: Scalar>(system: &LinearSystem<T>) -> bool {
    let n = unknowns(system);
    system
        .iter()
        .map(|row| leading_column(row, n))
        .tuple_windows()
        .all(|(upper, lower)| match (upper, lower) {
            (Some(a), Some(b)) => a < b,
            (None, Some(_)) => false,
            _ => true,
        })
}

/// Sweeps until the positional check holds, or hands over to a single pass
/// after `max_sweeps` sweeps.
fn ref_sweeps<T: Scalar>(mut sys: LinearSystem<T>, max_sweeps: usize) -> LinearSystem<T> {
    let rows = sys.rows();
    let size = unknowns(&sys).min(rows);
    let mut sweeps = 0;

    while !is_in_echelon_form(&sys, &get_pivots(&sys)) {
        if sweeps == max_sweeps {
            warn!("no echelon form after {} sweeps, finishing with a single pass", sweeps);
            return ref_single_pass(sys);
        }

        for i in 0..size {
            if get_pivots(&sys).get(i).is_none() {
                continue;
            }
            // The multipliers below use the diagonal entry, swapped in if needed.
            if sys[(i, i)].is_zero() {
                match (i + 1..rows).find(|&r| !sys[(r, i)].is_zero()) {
                    Some(r) => sys.swap_rows(i, r),
                    None => continue,
                }
            }
            for j in i + 1..rows {
                sys = rearrange_from(sys, j);
                if sys[(j, i)].is_zero() {
                    continue;
                }
                let row = eliminate(&sys[j], &sys[i], i, true);
                sys.replace_row(j, row);
            }
        }

        sweeps += 1;
        trace!("ref sweep {}:\n{}", sweeps, sys);
    }

    // Rank-deficient input can satisfy the positional check with two rows
    // leading in the same column.
    if has_staircase(&sys) {
        sys
    } else {
        ref_single_pass(sys)
    }
}

/// Gaussian elimination, one column at a time. The result has a strict staircase.
fn ref_single_pass<T: Scalar>(mut sys: LinearSystem<T>) -> LinearSystem<T> {
    let rows = sys.rows();
    let mut rank = 0;

    for col in 0..unknowns(&sys) {
        if rank == rows {
            break;
        }
        sys = rearrange_from(sys, rank);
        let Some(found) = (rank..rows).find(|&r| !sys[(r, col)].is_zero()) else {
            continue;
        };
        sys.swap_rows(rank, found);

        for r in rank + 1..rows {
            if !sys[(r, col)].is_zero() {
                let row = eliminate(&sys[r], &sys[rank], col, false);
                sys.replace_row(r, row);
            }
        }
        rank += 1;
    }
    trace!("ref single pass, rank {}:\n{}", rank, sys);
    sys
}

/// Moves the row leading in column `c` to position `c` when `c < rows`.
/// The other rows fill the free positions in their current order.
fn align_pivot_rows<T: Scalar>(sys: LinearSystem<T>) -> LinearSystem<T> {
    let (rows, n) = (sys.rows(), unknowns(&sys));
    let mut slots: Vec<Option<usize>> = vec![None; rows];
    let mut rest = Vec::new();

    for (r, row) in sys.iter().enumerate() {
        match leading_column(row, n) {
            Some(c) if c < rows && slots[c].is_none() => slots[c] = Some(r),
            _ => rest.push(r),
        }
    }

    let mut rest = rest.into_iter();
    let order: Vec<usize> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| rest.next()))
        .collect();
    sys.permute_rows(&order)
}

fn rref_sweeps<T: Scalar>(
    system: &LinearSystem<T>,
    identity: bool,
    max_sweeps: usize,
) -> LinearSystem<T> {
    let mut sys = ref_form(system);
    let rows = sys.rows();
    let size = unknowns(&sys).min(rows);
    let mut sweeps = 0;

    while !is_in_reduced_echelon_form(&sys, &get_pivots(&sys)) {
        if sweeps == max_sweeps {
            warn!("no reduced echelon form after {} sweeps, finishing with a single pass", sweeps);
            return rref_single_pass(sys, identity);
        }

        for i in 1..size {
            if get_pivots(&sys).get(i).is_none() || sys[(i, i)].is_zero() {
                continue;
            }
            for j in 0..i {
                if sys[(j, i)].is_zero() {
                    continue;
                }
                let row = eliminate(&sys[j], &sys[i], i, true);
                sys.replace_row(j, row);
            }
        }

        sweeps += 1;
        trace!("rref sweep {}:\n{}", sweeps, sys);
    }

    if identity {
        for i in 0..size {
            if !sys[(i, i)].is_zero() {
                let row = normalize(&sys[i], i);
                sys.replace_row(i, row);
            }
        }
    }
    sys
}

/// Forward elimination, then one backward pass from the bottom pivot row up.
fn rref_single_pass<T: Scalar>(system: LinearSystem<T>, identity: bool) -> LinearSystem<T> {
    let mut sys = ref_single_pass(system);
    let n = unknowns(&sys);

    for r in (0..sys.rows()).rev() {
        let Some(col) = leading_column(&sys[r], n) else {
            continue;
        };
        if identity {
            let row = normalize(&sys[r], col);
            sys.replace_row(r, row);
        }
        for j in 0..r {
            if !sys[(j, col)].is_zero() {
                let row = eliminate(&sys[j], &sys[r], col, false);
                sys.replace_row(j, row);
            }
        }
    }
    align_pivot_rows(sys)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
