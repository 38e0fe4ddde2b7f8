use thiserror::Error;

pub type MeasResult<T> = Result<T, MeasError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasError {
    #[error("Incompatible units: {lhs:?} != {rhs:?}")]
    IncompatibleUnits { lhs: String, rhs: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative uncertainty: {value}")]
    NegativeError { value: f64 },

    #[error("Cannot parse measurement from {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },
}

impl MeasError {
    pub(crate) fn incompatible(lhs: &str, rhs: &str) -> Self {
        Self::IncompatibleUnits {
            lhs: lhs.to_owned(),
            rhs: rhs.to_owned(),
        }
    }

    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        Self::Parse {
            input: input.to_owned(),
            reason,
        }
    }
}
