//! Package manager identities

use pkgprobe_errors::{Error, PackageError};
use serde::{Deserialize, Serialize};

/// The eleven package managers known to the catalog
///
/// This is a closed set; the verifiable/unverifiable partition over it is
/// owned by the verifier registry, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Homebrew,
    Chocolatey,
    Winget,
    Flatpak,
    Snap,
    Apt,
    Dnf,
    Pacman,
    Zypper,
    Yum,
    Scoop,
}

impl PackageManager {
    /// All known managers, in catalog declaration order
    pub const ALL: [Self; 11] = [
        Self::Homebrew,
        Self::Chocolatey,
        Self::Winget,
        Self::Flatpak,
        Self::Snap,
        Self::Apt,
        Self::Dnf,
        Self::Pacman,
        Self::Zypper,
        Self::Yum,
        Self::Scoop,
    ];

    /// Stable string identifier used in catalogs, the store, and the API
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Homebrew => "homebrew",
            Self::Chocolatey => "chocolatey",
            Self::Winget => "winget",
            Self::Flatpak => "flatpak",
            Self::Snap => "snap",
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Yum => "yum",
            Self::Scoop => "scoop",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homebrew" => Ok(Self::Homebrew),
            "chocolatey" => Ok(Self::Chocolatey),
            "winget" => Ok(Self::Winget),
            "flatpak" => Ok(Self::Flatpak),
            "snap" => Ok(Self::Snap),
            "apt" => Ok(Self::Apt),
            "dnf" => Ok(Self::Dnf),
            "pacman" => Ok(Self::Pacman),
            "zypper" => Ok(Self::Zypper),
            "yum" => Ok(Self::Yum),
            "scoop" => Ok(Self::Scoop),
            _ => Err(PackageError::UnknownManager { id: s.to_string() }.into()),
        }
    }
}

impl clap::ValueEnum for PackageManager {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
