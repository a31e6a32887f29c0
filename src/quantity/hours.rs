use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;
use ordered_float::OrderedFloat;

use crate::quantity::Quantity;

/// Fractional hours.
pub type Hours = Quantity<1, 0>;

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(OrderedFloat(time_delta.as_seconds_f64() / 3600.0))
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} h", self.0)
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}h", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_time_delta() {
        assert_eq!(Hours::from(TimeDelta::minutes(150)), Hours::from(2.5));
        assert_eq!(Hours::from(TimeDelta::minutes(-30)), Hours::from(-0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Hours::from(2.5).to_string(), "2.50 h");
    }
}
