use std::fmt;

/// Error for a raw forecast response that violates the provider shape
/// contract, either empty or with a sample missing a required field
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedForecastError(pub String);

impl fmt::Display for MalformedForecastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MalformedForecastError: {}", self.0)
    }
}
