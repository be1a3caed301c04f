//! Title detection from an install directory's marker files.

use std::path::Path;

use crate::error::{Result, StorageError};

/// One of the four supported titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Title {
    Diablo3,
    StarCraft1,
    Warcraft3,
    Wow,
}

impl Title {
    /// The short product code used in `.build.info`'s `Product` column and
    /// the CLI's `--app` flag.
    pub fn code(self) -> &'static str {
        match self {
            Self::Diablo3 => "d3",
            Self::StarCraft1 => "s1",
            Self::Warcraft3 => "w3",
            Self::Wow => "wow",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "d3" => Ok(Self::Diablo3),
            "s1" => Ok(Self::StarCraft1),
            "w3" => Ok(Self::Warcraft3),
            "wow" => Ok(Self::Wow),
            other => Err(StorageError::Unsupported(other.to_string())),
        }
    }

    const MARKERS: &'static [(Self, &'static [&'static str])] = &[
        (Self::Diablo3, &["Diablo III.exe", "Diablo III.app"]),
        (Self::Warcraft3, &["Warcraft III.exe", "Warcraft III.app"]),
        (Self::StarCraft1, &["StarCraft.exe", "StarCraft.app"]),
        (Self::Wow, &["Wow.exe", "World of Warcraft.app"]),
    ];

    /// Detect a title from marker files directly under `install_root`.
    pub fn detect(install_root: &Path) -> Result<Self> {
        for (title, markers) in Self::MARKERS {
            if markers.iter().any(|name| install_root.join(name).is_file()) {
                return Ok(*title);
            }
        }
        Err(StorageError::NoInstallation(
            install_root.display().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_title_from_marker_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Diablo III.exe"), b"").expect("write marker");
        assert_eq!(Title::detect(dir.path()).unwrap(), Title::Diablo3);
    }

    #[test]
    fn no_marker_is_no_installation() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            Title::detect(dir.path()),
            Err(StorageError::NoInstallation(_))
        ));
    }

    #[test]
    fn code_round_trips() {
        for title in [Title::Diablo3, Title::StarCraft1, Title::Warcraft3, Title::Wow] {
            assert_eq!(Title::from_code(title.code()).unwrap(), title);
        }
    }
}
