//! Pivot bookkeeping and the echelon-form predicates.
//!
//! All checks here are positional: column `i` is tested against row index `i`,
//! whichever row actually supplied the pivot value of that column.

use itertools::Itertools;
use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};
use crate::matrix::matrix::LinearSystem;
use crate::matrix::vector::Vector;
use crate::rings::scalar::Scalar;

/// One optional slot per unknown column of a linear system.
///
/// Describes the pivot values of a system, and is reused as the solution
/// vector of the solver where an absent slot is a free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivots<T> {
    slots: Vec<Option<T>>,
}

impl<T> Pivots<T> {
    pub fn absent(len: usize) -> Self {
        Pivots {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    pub fn from_list(slots: Vec<Option<T>>) -> Self {
        Pivots { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.slots.get(i).and_then(|slot| slot.as_ref())
    }

    pub fn at(&self, i: usize) -> Result<Option<&T>> {
        self.slots
            .get(i)
            .map(|slot| slot.as_ref())
            .ok_or(Error::IndexOutOfRange {
                index: i,
                len: self.len(),
            })
    }

    pub fn set(&mut self, i: usize, value: Option<T>) -> Result<()> {
        let len = self.len();
        *self
            .slots
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len })? = value;
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<T>> {
        self.slots.iter()
    }

    /// Number of slots holding a value.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn into_vec(self) -> Vec<Option<T>> {
        self.slots
    }
}

impl<T> Index<usize> for Pivots<T> {
    type Output = Option<T>;

    fn index(&self, i: usize) -> &Option<T> {
        &self.slots[i]
    }
}

impl<T: fmt::Display> fmt::Display for Pivots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.iter().map(|slot| match slot {
            Some(x) => x.to_string(),
            None => "None".to_string(),
        });
        write!(f, "[{}]", slots.format(", "))
    }
}

/// Number of coefficient columns: every column except the augmented one.
#[inline(always)]
pub(crate) fn unknowns<T>(system: &LinearSystem<T>) -> usize {
    system.cols().saturating_sub(1)
}

/// Column of the first non-zero coefficient of `row`.
pub(crate) fn leading_column<T: Scalar>(row: &Vector<T>, unknowns: usize) -> Option<usize> {
    row.iter().take(unknowns).position(|x| !x.is_zero())
}

/// Scans rows top to bottom; in each row the first non-zero coefficient whose
/// column has no pivot yet becomes that column's pivot.
pub fn get_pivots<T: Scalar>(system: &LinearSystem<T>) -> Pivots<T> {
    let n = unknowns(system);
    let mut pivots = Pivots::absent(n);

    for row in system.iter() {
        let found = row
            .iter()
            .take(n)
            .enumerate()
            .find(|(i, x)| !x.is_zero() && pivots.slots[*i].is_none());
        if let Some((i, x)) = found {
            pivots.slots[i] = Some(x.clone());
        }
    }
    pivots
}

/// Every pivot column `i` must be zero on all rows below row `i`.
pub fn is_in_echelon_form<T: Scalar>(system: &LinearSystem<T>, pivots: &Pivots<T>) -> bool {
    (0..pivots.len())
        .filter(|&i| pivots.get(i).is_some())
        .all(|i| (i + 1..system.rows()).all(|j| system[(j, i)].is_zero()))
}

/// Echelon form, plus every pivot column `i` zero on all rows above row `i`.
pub fn is_in_reduced_echelon_form<T: Scalar>(
    system: &LinearSystem<T>,
    pivots: &Pivots<T>,
) -> bool {
    if !is_in_echelon_form(system, pivots) {
        return false;
    }
    (1..pivots.len())
        .filter(|&i| pivots.get(i).is_some())
        .all(|i| (0..i.min(system.rows())).all(|j| system[(j, i)].is_zero()))
}

/// Some row reads `0 = b` with `b != 0`.
pub fn is_inconsistent<T: Scalar>(system: &LinearSystem<T>) -> bool {
    let n = unknowns(system);
    system.iter().any(|row| {
        row.iter().take(n).all(|x| x.is_zero())
            && row.back().is_some_and(|b| !b.is_zero())
    })
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
