//! Error types for static configuration tables.

use std::error::Error;
use std::fmt;

/// Errors detected while validating region or category tables.
#[derive(Clone, Debug, PartialEq)]
pub enum TableError {
    /// The table has no entries.
    Empty {
        /// Which table was empty.
        table: &'static str,
    },
    /// A weight or share is negative, NaN, or infinite.
    InvalidWeight {
        /// Name of the offending entry.
        entry: String,
        /// The rejected value.
        value: f64,
    },
    /// All weights are zero, so no entry can ever be selected.
    ZeroTotalWeight,
    /// Category shares do not sum to 1.0.
    DistributionSum {
        /// The actual sum.
        sum: f64,
    },
    /// A region spread is negative or non-finite.
    InvalidSpread {
        /// Name of the offending region.
        region: String,
    },
    /// A region anchor is not a finite coordinate.
    InvalidAnchor {
        /// Name of the offending region.
        region: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { table } => write!(f, "{table} table is empty"),
            Self::InvalidWeight { entry, value } => {
                write!(f, "weight for '{entry}' must be finite and >= 0, got {value}")
            }
            Self::ZeroTotalWeight => write!(f, "total weight is zero"),
            Self::DistributionSum { sum } => {
                write!(f, "category shares must sum to 1.0, got {sum}")
            }
            Self::InvalidSpread { region } => {
                write!(f, "spread for region '{region}' must be finite and >= 0")
            }
            Self::InvalidAnchor { region } => {
                write!(f, "anchor for region '{region}' is not finite")
            }
        }
    }
}

impl Error for TableError {}
