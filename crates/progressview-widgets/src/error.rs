//! Error types for loading progress bar attributes.

use progressview_core::ColorParseError;
use thiserror::Error;

/// Error raised while turning configuration into a [`ProgressStyle`](crate::ProgressStyle).
#[derive(Debug, Error)]
pub enum StyleError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A color attribute is not a valid hex color
    #[error("invalid color for '{attr}': {source}")]
    Color {
        /// Attribute name
        attr: &'static str,
        /// Underlying parse failure
        #[source]
        source: ColorParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_error_display() {
        let err = StyleError::Color {
            attr: "bar_color",
            source: ColorParseError::InvalidHex,
        };
        assert_eq!(
            err.to_string(),
            "invalid color for 'bar_color': invalid hex characters"
        );
    }

    #[test]
    fn test_style_error_source_chain() {
        use std::error::Error as _;

        let err = StyleError::Color {
            attr: "thumb_fill_color",
            source: ColorParseError::InvalidLength(2),
        };
        let source = err.source().expect("color error has a source");
        assert_eq!(
            source.to_string(),
            "invalid hex string length 2 (expected 6 or 8)"
        );
    }
}
