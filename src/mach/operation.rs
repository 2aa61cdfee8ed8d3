use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Binary operations on values. Both operands are consumed; mixed
/// `Int`/`Real` promotes the integer. Integer arithmetic wraps.
pub struct Operation {}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Str(l) => match rhs {
                Str(r) => Ok(Str(l + &r)),
                _ => Err(error!(TypeMismatch)),
            },
            Int(l) => match rhs {
                Int(r) => Ok(Int(l.wrapping_add(r))),
                Real(r) => Ok(Real(l as f64 + r)),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l + r as f64)),
                Real(r) => Ok(Real(l + r)),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Int(l) => match rhs {
                Int(r) => Ok(Int(l.wrapping_sub(r))),
                Real(r) => Ok(Real(l as f64 - r)),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l - r as f64)),
                Real(r) => Ok(Real(l - r)),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Int(l) => match rhs {
                Int(r) => Ok(Int(l.wrapping_mul(r))),
                Real(r) => Ok(Real(l as f64 * r)),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l * r as f64)),
                Real(r) => Ok(Real(l * r)),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Int(l) => match rhs {
                Int(0) => Err(error!(DivisionByZero)),
                Int(r) => Ok(Int(l.wrapping_div(r))),
                Real(r) => Ok(Real(l as f64 / r)),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l / r as f64)),
                Real(r) => Ok(Real(l / r)),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn remainder(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Int(l) => match rhs {
                Int(0) => Err(error!(DivisionByZero)),
                Int(r) => Ok(Int(l.wrapping_rem(r))),
                Real(r) => Ok(Real(l as f64 % r)),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l % r as f64)),
                Real(r) => Ok(Real(l % r)),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Int(l) => match rhs {
                Int(r) => Ok(Int(int_power(l, r))),
                Real(r) => Ok(Real((l as f64).powf(r))),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Int(r) => Ok(Real(l.powf(r as f64))),
                Real(r) => Ok(Real(l.powf(r))),
                _ => Err(error!(TypeMismatch)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Same-typed comparison only. A mismatch is an error, never `false`.
    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Int(l), Int(r)) => Ok(Bool(l == r)),
            (Real(l), Real(r)) => Ok(Bool(l == r)),
            (Bool(l), Bool(r)) => Ok(Bool(l == r)),
            (Str(l), Str(r)) => Ok(Bool(l == r)),
            _ => Err(error!(TypeMismatch)),
        }
    }
}

/// Exponentiation by squaring. Negative exponents truncate to zero.
fn int_power(base: i64, exponent: i64) -> i64 {
    if exponent < 0 {
        return 0;
    }
    let mut result: i64 = 1;
    let mut base = base;
    let mut exponent = exponent as u64;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        exponent >>= 1;
        base = base.wrapping_mul(base);
    }
    result
}
