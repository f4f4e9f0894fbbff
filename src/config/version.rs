//! Admin API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version.
///
/// Exports are pinned to [`ApiVersion::V2024_10`], the version the CSV
/// layouts were built against. Newer versions can be selected with
/// `SHOPIFY_API_VERSION`; anything matching `YYYY-MM` on a quarterly month
/// parses as [`ApiVersion::Custom`].
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::ApiVersion;
///
/// assert_eq!(ApiVersion::default(), ApiVersion::V2024_10);
///
/// let version: ApiVersion = "2025-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_01);
/// assert_eq!(format!("{}", ApiVersion::V2024_10), "2024-10");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// API version 2024-10 (October 2024)
    #[default]
    V2024_10,
    /// API version 2025-01 (January 2025)
    V2025_01,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-07 (July 2025)
    V2025_07,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// Unstable API version for development and testing.
    Unstable,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns the oldest version still inside Shopify's support window.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_01
    }

    /// Returns `true` if this version is past Shopify's support window.
    ///
    /// `Unstable` and `Custom` versions are never considered deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Unstable | Self::Custom(_) => false,
            _ => *self < Self::minimum_supported(),
        }
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2024_10 => 1,
            Self::V2025_01 => 2,
            Self::V2025_04 => 3,
            Self::V2025_07 => 4,
            Self::V2025_10 => 5,
            Self::Unstable => 100,
            Self::Custom(_) => 101,
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.cmp(b),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
