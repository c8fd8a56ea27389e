use crate::{Error, Result};

/// `MAJOR.MINOR` version of the library under test.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(3, 1)
    }
}

impl std::str::FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_owned());
        let mut parts = s.trim().split('.');
        let major = parts.next().ok_or_else(invalid)?;
        let minor = parts.next().ok_or_else(invalid)?;
        // Patch and tweak components are accepted and ignored.
        for rest in parts {
            rest.parse::<u32>().map_err(|_| invalid())?;
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("3.1".parse::<Version>().unwrap(), Version::new(3, 1));
        assert_eq!("2.5.16.0".parse::<Version>().unwrap(), Version::new(2, 5));
        assert!("3".parse::<Version>().is_err());
        assert!("3.x".parse::<Version>().is_err());
        assert!("3.1.beta".parse::<Version>().is_err());
    }
}
