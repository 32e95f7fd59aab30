//! Native runtime version, used to gate platform workarounds.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `major.minor.patch`, ordered lexicographically by component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Decode the packed `major * 1_000_000 + minor * 1_000 + patch` form native
    /// runtimes commonly report.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            major: packed / 1_000_000,
            minor: (packed / 1_000) % 1_000,
            patch: packed % 1_000,
        }
    }

    /// Inverse of [`from_packed`](Self::from_packed). Widened so any major fits.
    pub const fn packed(&self) -> u64 {
        self.major as u64 * 1_000_000 + self.minor as u64 * 1_000 + self.patch as u64
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for RuntimeVersion {
    type Err = ConfigError;

    /// Accepts `major`, `major.minor` or `major.minor.patch`; missing parts are zero.
    /// Minor and patch must stay below 1000 so the packed form is unambiguous.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::Version(s.to_owned());
        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in s.trim().split('.') {
            if count == parts.len() {
                return Err(bad());
            }
            parts[count] = piece.parse().map_err(|_| bad())?;
            count += 1;
        }
        if parts[1] > 999 || parts[2] > 999 {
            return Err(bad());
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for RuntimeVersion {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RuntimeVersion> for String {
    fn from(v: RuntimeVersion) -> Self {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_order() {
        let fixed: RuntimeVersion = "3.2.0".parse().unwrap();
        assert!(RuntimeVersion::new(3, 1, 10) < fixed);
        assert!(RuntimeVersion::new(3, 2, 1) > fixed);
        assert_eq!("3".parse::<RuntimeVersion>().unwrap(), RuntimeVersion::new(3, 0, 0));
        assert!("3.x".parse::<RuntimeVersion>().is_err());
        assert!("1.2.3.4".parse::<RuntimeVersion>().is_err());
        assert!("".parse::<RuntimeVersion>().is_err());
    }

    #[test]
    fn packed_form() {
        let v = RuntimeVersion::from_packed(3_002_010);
        assert_eq!(v, RuntimeVersion::new(3, 2, 10));
        assert_eq!(v.packed(), 3_002_010);
        assert_eq!(v.to_string(), "3.2.10");
    }

    #[test]
    fn large_components() {
        let v: RuntimeVersion = "5000.0.0".parse().unwrap();
        assert_eq!(v.packed(), 5_000_000_000);
        assert_eq!(RuntimeVersion::new(u32::MAX, 999, 999).packed(), 4_294_967_295_999_999);
        assert!("1.1000.0".parse::<RuntimeVersion>().is_err());
        assert!("1.0.1000".parse::<RuntimeVersion>().is_err());
        assert_eq!("1.999.999".parse::<RuntimeVersion>().unwrap().packed(), 1_999_999);
    }
}
