use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

use crate::error::Error;

/// Exact rational number, always stored in lowest terms with a positive denominator.
#[derive(Debug, Clone)]
pub struct Fraction {
    pub num: BigInt,
    pub den: BigInt,
}

impl Fraction {
    /// Panics if `den` is zero, like integer division does.
    pub fn new(num: BigInt, den: BigInt) -> Self {
        if den.is_zero() {
            panic!("Denominator cannot be zero");
        }

        let g = &num.gcd(&den);
        let num = num / g;
        let den = den / g;

        if den < BigInt::zero() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn try_new(num: BigInt, den: BigInt) -> Result<Self, Error> {
        if den.is_zero() {
            return Err(Error::InvalidFraction(format!("{}/{}", num, den)));
        }
        Ok(Fraction::new(num, den))
    }

    pub fn ratio(num: i64, den: i64) -> Self {
        Fraction::new(BigInt::from(num), BigInt::from(den))
    }
}

impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidFraction(s.to_string());
        let mut nums = s.split('/');
        let num = nums.next().ok_or_else(invalid)?.trim();
        let den = nums.next().unwrap_or("1").trim();
        if nums.next().is_some() {
            return Err(invalid());
        }

        Fraction::try_new(
            BigInt::parse_bytes(num.as_bytes(), 10).ok_or_else(invalid)?,
            BigInt::parse_bytes(den.as_bytes(), 10).ok_or_else(invalid)?,
        )
        .map_err(|_| invalid())
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::new(self.num + rhs.num, self.den);
        }

        Fraction::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + (-rhs)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::from(1)
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::from(0)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Fraction> for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl Eq for Fraction {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
