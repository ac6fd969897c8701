use std::fmt;
use std::path::PathBuf;

/// Errors related to distribution parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Standard deviation must be finite and strictly positive
    InvalidStdDev(f64),
    /// Specification limit multiplier must be finite and strictly positive
    InvalidLimit(f64),
    NonFinite {
        name: &'static str,
        value: f64,
    },
    /// Shape parameters rejected by the sampling distribution
    InvalidDistribution {
        distribution: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::InvalidStdDev(value) => {
                write!(f, "standard deviation must be positive and finite, got {value}")
            }
            ParameterError::InvalidLimit(value) => {
                write!(f, "limit multiplier must be positive and finite, got {value}")
            }
            ParameterError::NonFinite { name, value } => {
                write!(f, "parameter {name} must be finite, got {value}")
            }
            ParameterError::InvalidDistribution {
                distribution,
                reason,
            } => write!(f, "invalid {distribution} parameters: {reason}"),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors raised while loading or aggregating climate observations
#[derive(Debug)]
pub enum ClimateError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        line: Option<u64>,
        source: csv::Error,
    },
    InvalidDate {
        line: Option<u64>,
        value: String,
        source: jiff::Error,
    },
    InvalidValue {
        line: Option<u64>,
        value: String,
    },
    /// Nothing left to build the historical records from
    NoBaselineData { target_year: i16 },
    NoTargetData { target_year: i16 },
}

fn fmt_line(line: Option<u64>) -> String {
    line.map_or_else(String::new, |l| format!(" (line {l})"))
}

impl fmt::Display for ClimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClimateError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ClimateError::Csv { line, source } => {
                write!(f, "malformed CSV{}: {source}", fmt_line(*line))
            }
            ClimateError::InvalidDate { line, value, .. } => {
                write!(f, "invalid date {value:?}{}", fmt_line(*line))
            }
            ClimateError::InvalidValue { line, value } => {
                write!(f, "invalid Data_Value {value:?}{}", fmt_line(*line))
            }
            ClimateError::NoBaselineData { target_year } => {
                write!(f, "no observations outside the target year {target_year}")
            }
            ClimateError::NoTargetData { target_year } => {
                write!(f, "no observations for the target year {target_year}")
            }
        }
    }
}

impl std::error::Error for ClimateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClimateError::Io { source, .. } => Some(source),
            ClimateError::Csv { source, .. } => Some(source),
            ClimateError::InvalidDate { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for ClimateError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        ClimateError::Csv { line, source: err }
    }
}

pub type Result<T> = std::result::Result<T, ParameterError>;
