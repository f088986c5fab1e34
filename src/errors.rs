//! Error taxonomy shared by the reference data provider, the sector modules
//! and the orchestrator.

use std::fmt;

use thiserror::Error;

use crate::record::Shape;

/// Reference table a lookup key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Fact,
    Assumption,
    Entry,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Fact => "fact",
            Table::Assumption => "assumption",
            Table::Entry => "entry",
        };
        f.write_str(name)
    }
}

/// Everything that can abort a balance calculation.
///
/// `UnknownKey` and `ShapeMismatch` indicate a mismatch between reference
/// data and code and are never recovered from. `UnknownMunicipality` and
/// `InvalidTargetYear` are request validation failures.
#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("unknown {table} key \"{key}\"")]
    UnknownKey { table: Table, key: String },

    #[error("unknown municipality \"{0}\"")]
    UnknownMunicipality(String),

    #[error("target year {year} outside supported range {min}..={max}")]
    InvalidTargetYear { year: i32, min: i32, max: i32 },

    #[error("cannot aggregate records of shape {found} into shape {expected}")]
    ShapeMismatch { expected: Shape, found: Shape },

    #[error("cannot aggregate an empty list of records")]
    EmptyAggregate,

    #[error("{source_name}:{line}: {message}")]
    DataFormat {
        source_name: String,
        line: u64,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BalanceError {
    pub(crate) fn unknown_key(table: Table, key: &str) -> Self {
        BalanceError::UnknownKey {
            table,
            key: key.to_string(),
        }
    }

    /// True for failures caused by the request rather than by reference data or code.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            BalanceError::UnknownMunicipality(_) | BalanceError::InvalidTargetYear { .. }
        )
    }
}

/// Convenience type alias for results returned by this crate.
pub type BalanceResult<T> = Result<T, BalanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_names_table_and_key() {
        let err = BalanceError::unknown_key(Table::Assumption, "Ass_Foo");
        assert_eq!(err.to_string(), "unknown assumption key \"Ass_Foo\"");
    }

    #[test]
    fn request_errors_are_classified() {
        assert!(BalanceError::UnknownMunicipality("X".into()).is_request_error());
        assert!(
            BalanceError::InvalidTargetYear {
                year: 2000,
                min: 2023,
                max: 2050
            }
            .is_request_error()
        );
        assert!(!BalanceError::EmptyAggregate.is_request_error());
    }
}
