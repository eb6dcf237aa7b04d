use std::fmt;
use std::str::FromStr;

use crate::error::{CoordError, EasementError, Result};

/// Kilometres per mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Speed tolerance of a curve, stored in km/h.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed {
    kmh: f64,
}

impl Speed {
    /// Creates a speed from km/h.
    ///
    /// # Errors
    ///
    /// Returns an error if `kmh` is not a finite positive number.
    pub fn from_kmh(kmh: f64) -> Result<Self> {
        if !kmh.is_finite() || kmh <= 0.0 {
            return Err(CoordError::InvalidNumber {
                what: "speed",
                value: kmh,
            }
            .into());
        }
        Ok(Self { kmh })
    }

    /// Creates a speed from mph.
    ///
    /// # Errors
    ///
    /// Returns an error if `mph` is not a finite positive number.
    pub fn from_mph(mph: f64) -> Result<Self> {
        Self::from_kmh(mph * KM_PER_MILE)
    }

    #[must_use]
    pub fn kmh(self) -> f64 {
        self.kmh
    }

    #[must_use]
    pub fn mph(self) -> f64 {
        self.kmh / KM_PER_MILE
    }
}

impl FromStr for Speed {
    type Err = EasementError;

    /// Parses values such as `"120 km/h"`, `"75mph"` or `"90 kph"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoordError::InvalidSpeed(s.to_owned());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (value, unit) = trimmed.split_at(split);
        let value: f64 = value.trim().parse().map_err(|_| invalid())?;

        match unit.trim().to_ascii_lowercase().as_str() {
            "mph" => Self::from_mph(value),
            "kph" | "kmh" | "km/h" => Self::from_kmh(value),
            _ => Err(invalid().into()),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mph / {:.1} km/h", self.mph(), self.kmh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mph_conversion() {
        let speed = Speed::from_mph(75.0).unwrap();
        assert!((speed.kmh() - 120.700_8).abs() < 1e-9);
        assert!((speed.mph() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn parse_units() {
        assert!(("120 km/h".parse::<Speed>().unwrap().kmh() - 120.0).abs() < 1e-12);
        assert!(("90kph".parse::<Speed>().unwrap().kmh() - 90.0).abs() < 1e-12);
        assert!(("80 KMH".parse::<Speed>().unwrap().kmh() - 80.0).abs() < 1e-12);
        assert!(("50 mph".parse::<Speed>().unwrap().mph() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("fast".parse::<Speed>().is_err());
        assert!("120".parse::<Speed>().is_err());
        assert!("120 knots".parse::<Speed>().is_err());
        assert!("-5 mph".parse::<Speed>().is_err());
    }

    #[test]
    fn non_positive_speed_fails() {
        assert!(Speed::from_kmh(0.0).is_err());
        assert!(Speed::from_kmh(f64::NAN).is_err());
    }
}
