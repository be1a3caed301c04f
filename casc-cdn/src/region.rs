//! The patch-service regions this backend bootstraps against.

use std::fmt;

use crate::error::{CdnError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Us,
    Eu,
    Kr,
    Tw,
    Cn,
}

impl Region {
    pub fn all() -> [Self; 5] {
        [Self::Us, Self::Eu, Self::Kr, Self::Tw, Self::Cn]
    }

    pub fn parse(code: &str) -> Result<Self> {
        match code.to_ascii_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "kr" => Ok(Self::Kr),
            "tw" => Ok(Self::Tw),
            "cn" => Ok(Self::Cn),
            other => Err(CdnError::UnknownRegion(other.to_string())),
        }
    }

    /// The TACT v1 patch-service base URL this region bootstraps from.
    pub fn patch_base_url(&self) -> String {
        format!("http://{self}.patch.battle.net:1119")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
            Self::Cn => "cn",
        };
        write!(f, "{code}")
    }
}
