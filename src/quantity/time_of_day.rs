use std::{
    fmt::{Debug, Display, Formatter},
    ops::Sub,
    str::FromStr,
};

use chrono::{NaiveTime, TimeDelta};

/// Wall-clock time of a booking boundary: no date, no timezone.
///
/// Serialized on the wire as a zero-padded `HH:MM` string.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay(NaiveTime);

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(string, "%H:%M").map(Self)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Debug for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Sub for TimeOfDay {
    type Output = TimeDelta;

    /// Signed span between two wall-clock times, no midnight wraparound.
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() -> anyhow::Result<()> {
        assert_eq!("09:05".parse::<TimeOfDay>()?.to_string(), "09:05");
        assert_eq!("23:59".parse::<TimeOfDay>()?.to_string(), "23:59");
        Ok(())
    }

    #[test]
    fn test_parse_err() {
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("09:60".parse::<TimeOfDay>().is_err());
        assert!("9h00".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_sub() -> anyhow::Result<()> {
        let start = "09:00".parse::<TimeOfDay>()?;
        let end = "11:30".parse::<TimeOfDay>()?;
        assert_eq!(end - start, TimeDelta::minutes(150));
        assert_eq!(start - end, TimeDelta::minutes(-150));
        Ok(())
    }
}
