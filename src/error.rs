use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the transport engine and its configuration layer.
///
/// Only construction and reset can fail; `step` and the read accessors are total.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter (spacing, speed, area, counts).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed TOML configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParameter("ion_spacing must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("ion_spacing"));
    }

    #[test]
    fn toml_errors_convert() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("width = ");
        let err: Error = parsed.unwrap_err().into();
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn result_type_alias_compiles() -> Result<()> {
        Ok(())
    }
}
