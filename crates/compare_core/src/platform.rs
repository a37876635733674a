use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Retail platform being compared.
///
/// Declaration order is the fixed enumeration order used for tie-breaks and
/// for rendering, so the derived `Ord` matches `Platform::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    Flipkart,
    Myntra,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Amazon, Platform::Flipkart, Platform::Myntra];

    /// Key used by the search backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
            Platform::Myntra => "myntra",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::Flipkart => "Flipkart",
            Platform::Myntra => "Myntra",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform {0:?}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_keys_are_lowercase() {
        assert_eq!(serde_json::to_value(Platform::Flipkart).unwrap(), json!("flipkart"));
        assert_eq!(
            serde_json::from_value::<Platform>(json!("myntra")).unwrap(),
            Platform::Myntra
        );
        assert!(serde_json::from_value::<Platform>(json!("Myntra")).is_err());
    }

    #[test]
    fn parsing_is_lenient_about_case_and_padding() {
        assert_eq!(" AMAZON ".parse::<Platform>(), Ok(Platform::Amazon));
        assert_eq!(
            "snapdeal".parse::<Platform>(),
            Err(UnknownPlatform("snapdeal".to_string()))
        );
    }
}
