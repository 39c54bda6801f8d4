use std::fmt;

#[derive(Debug)]
pub enum OWMError {
    OpenWeather(String),
    Document(String),
    NotFound(String),
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::OpenWeather(e) => write!(f, "OWMError::OpenWeather: {}", e),
            OWMError::Document(e) => write!(f, "OWMError::Document: {}", e),
            OWMError::NotFound(e) => write!(f, "OWMError::NotFound: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::OpenWeather(e.to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Document(e.to_string())
    }
}
