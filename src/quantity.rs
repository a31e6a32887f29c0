pub mod cost;
pub mod hours;
pub mod rate;
pub mod time_of_day;

use std::ops::Mul;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Dimensional quantity: `TIME` and `COST` are the exponents of the hour
/// and dinar dimensions respectively.
#[derive(
    Clone,
    Copy,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<const TIME: isize, const COST: isize>(pub OrderedFloat<f64>);

impl<const TIME: isize, const COST: isize> Quantity<TIME, COST> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }

    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }
}

impl<const TIME: isize, const COST: isize> From<f64> for Quantity<TIME, COST> {
    fn from(value: f64) -> Self {
        Self(OrderedFloat(value))
    }
}

impl<const TIME: isize, const COST: isize> Mul<f64> for Quantity<TIME, COST> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bare = Quantity<0, 0>;

    #[test]
    fn test_min() {
        assert_eq!(Bare::from(1.0).min(Bare::from(2.0)).0, OrderedFloat(1.0));
        assert_eq!(Bare::from(2.0).min(Bare::from(1.0)).0, OrderedFloat(1.0));
    }

    #[test]
    fn test_max() {
        assert_eq!(Bare::from(1.0).max(Bare::from(2.0)).0, OrderedFloat(2.0));
        assert_eq!(Bare::from(2.0).max(Bare::from(1.0)).0, OrderedFloat(2.0));
    }

    #[test]
    fn test_sum() {
        let total: Bare = [Bare::from(1.0), Bare::from(2.5)].into_iter().sum();
        assert_eq!(total.0, OrderedFloat(3.5));
    }
}
