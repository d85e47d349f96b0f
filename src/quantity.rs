//! # Requested orbital quantity
//!
//! The pipeline plots one of two quantities against elapsed time: the **altitude**
//! or the **semi-major axis** of the orbit. Each reader maps the requested quantity
//! onto its own record layout (see [`crate::formats`]).
//!
//! The operator-facing spelling is `"altitude"` or `"semi-major"`. Any other string is
//! rejected with [`ApsisError::InvalidQuantity`] before a single input file is opened,
//! which is why the readers take a typed [`Quantity`] and never a raw string.

use std::{fmt, str::FromStr};

use crate::apsis_errors::ApsisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantity {
    Altitude,
    #[default]
    SemiMajorAxis,
}

impl Quantity {
    /// Label of the y axis on the comparison plot.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Quantity::Altitude => "Altitude / km",
            Quantity::SemiMajorAxis => "Semi-Major Axis / km",
        }
    }

    /// Field name used in parse diagnostics.
    pub fn field_name(&self) -> &'static str {
        match self {
            Quantity::Altitude => "altitude",
            Quantity::SemiMajorAxis => "semi_major_axis",
        }
    }

    /// Operator-facing spelling, accepted back by [`Quantity::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Altitude => "altitude",
            Quantity::SemiMajorAxis => "semi-major",
        }
    }
}

impl FromStr for Quantity {
    type Err = ApsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "altitude" => Ok(Quantity::Altitude),
            "semi-major" => Ok(Quantity::SemiMajorAxis),
            other => Err(ApsisError::InvalidQuantity(other.to_string())),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
