use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

use crate::rings::fraction::Fraction;

/// Coefficient type of vectors, matrices and linear systems.
///
/// Pivot tests compare against an exact zero. Rounding residue is removed
/// where it is created: a difference that cancels down to a tiny fraction of
/// its operands becomes zero. For floats "tiny" is relative, so a system
/// scaled by `1e-8` reduces the same way as the original. Exact types (like
/// [`Fraction`]) never leave residue.
pub trait Scalar:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Debug
    + Display
{
    /// Whether `self`, computed as `lhs - rhs`, is only rounding residue.
    fn is_residue(&self, _lhs: &Self, _rhs: &Self) -> bool {
        self.is_zero()
    }

    /// `self - rhs`, with rounding residue replaced by an exact zero.
    fn sub_snapped(self, rhs: Self) -> Self {
        let diff = self.clone() - rhs.clone();
        if diff.is_residue(&self, &rhs) {
            Self::zero()
        } else {
            diff
        }
    }
}

macro_rules! impl_float_scalar {
    ($($t:ty => $tolerance:expr),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline(always)]
                fn is_residue(&self, lhs: &Self, rhs: &Self) -> bool {
                    self.abs() <= $tolerance * lhs.abs().max(rhs.abs())
                }
            }
        )*
    };
}

impl_float_scalar!(f32 => 1e-5, f64 => 1e-10);

impl Scalar for Fraction {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
