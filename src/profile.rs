//! Hardware profiles: load address offsets and page size defaults.
//!
//! Packing rejects unknown profile names, unpacking falls back to
//! [`Profile::Normal`]. The two directions intentionally disagree; existing
//! scripts rely on `unpack` accepting anything.

use std::fmt;
use std::str::FromStr;

use crate::error::{BootImageError, Result};

/// Named set of address and page size defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Generic layout (`norm`).
    #[default]
    Normal,
    /// Rockchip layout (`rtk`), with different offsets and 16 KiB pages.
    RockchipVariant,
}

/// Constants for one profile. Addresses are `base + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileConsts {
    pub kernel_addr_offset: u32,
    pub ramdisk_addr_offset: u32,
    pub second_addr_offset: u32,
    pub tags_addr_offset: u32,
    pub default_page_size: u32,
    pub default_base: u32,
}

const NORMAL_CONSTS: ProfileConsts = ProfileConsts {
    kernel_addr_offset: 0x0000_8000,
    ramdisk_addr_offset: 0x0100_0000,
    second_addr_offset: 0x00F0_0000,
    tags_addr_offset: 0x0000_0100,
    default_page_size: 2048,
    default_base: 0x1000_0000,
};

const ROCKCHIP_CONSTS: ProfileConsts = ProfileConsts {
    kernel_addr_offset: 0x0040_8000,
    ramdisk_addr_offset: 0x0200_0000,
    second_addr_offset: 0x00F0_0000,
    tags_addr_offset: 0x0008_8000,
    default_page_size: 16384,
    default_base: 0x6000_0000,
};

impl Profile {
    /// Constants for this profile.
    pub const fn consts(self) -> ProfileConsts {
        match self {
            Profile::Normal => NORMAL_CONSTS,
            Profile::RockchipVariant => ROCKCHIP_CONSTS,
        }
    }

    /// Short name as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Profile::Normal => "norm",
            Profile::RockchipVariant => "rtk",
        }
    }

    /// Resolve a profile name for packing. Unknown names are an error.
    pub fn resolve_strict(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("rtk") {
            Ok(Profile::RockchipVariant)
        } else if name.eq_ignore_ascii_case("norm") {
            Ok(Profile::Normal)
        } else {
            Err(BootImageError::UnknownProfile(name.to_string()))
        }
    }

    /// Resolve a profile name for unpacking. Anything but `rtk` is `Normal`.
    pub fn resolve_lenient(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.eq_ignore_ascii_case("rtk") => Profile::RockchipVariant,
            _ => Profile::Normal,
        }
    }
}

impl FromStr for Profile {
    type Err = BootImageError;

    fn from_str(s: &str) -> Result<Self> {
        Profile::resolve_strict(s)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
