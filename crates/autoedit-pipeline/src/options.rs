//! Caller-selectable enhancement options
//!
//! Only the optional stages can be switched; the tone chain and detail
//! stage always run with fixed parameters.

use serde::{Deserialize, Serialize};

/// Switches for the optional stages
///
/// Deserializes from JSON such as `{"denoise": false}`; missing fields
/// take their defaults and unknown fields are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhanceOptions {
    /// Run non-local-means denoising after detail enhancement (default on)
    pub denoise: bool,
    /// Run the linear colour balance last (default off)
    pub color_balance: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            denoise: true,
            color_balance: false,
        }
    }
}

impl EnhanceOptions {
    /// Options with both defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether denoising runs.
    pub fn with_denoise(mut self, denoise: bool) -> Self {
        self.denoise = denoise;
        self
    }

    /// Set whether colour balance runs.
    pub fn with_color_balance(mut self, color_balance: bool) -> Self {
        self.color_balance = color_balance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = EnhanceOptions::default();
        assert!(o.denoise);
        assert!(!o.color_balance);
        assert_eq!(o, EnhanceOptions::new());
    }

    #[test]
    fn test_builders() {
        let o = EnhanceOptions::new()
            .with_denoise(false)
            .with_color_balance(true);
        assert!(!o.denoise && o.color_balance);
    }

    #[test]
    fn test_json() {
        let o: EnhanceOptions = serde_json::from_str(r#"{"color_balance": true}"#).unwrap();
        assert!(o.denoise && o.color_balance);
        let o: EnhanceOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(o, EnhanceOptions::default());
        assert!(serde_json::from_str::<EnhanceOptions>(r#"{"sharpen": true}"#).is_err());
    }
}
