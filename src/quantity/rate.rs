use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, hours::Hours};

/// Dinars per hour.
pub type HourlyRate = Quantity<-1, 1>;

impl Mul<Hours> for HourlyRate {
    type Output = Cost;

    fn mul(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Display for HourlyRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} DT/h", self.0)
    }
}

impl Debug for HourlyRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}DT/h", self.0)
    }
}
