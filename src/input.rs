//! Loading image components from disk.
//!
//! Everything is read whole into memory before packing starts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BootImageError, Result};

/// Ramdisk argument value meaning "no ramdisk".
pub const NO_RAMDISK: &str = "NONE";

/// Where the ramdisk comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RamdiskSource {
    /// Explicitly absent; packed as a zero-length section.
    None,
    File(PathBuf),
}

impl RamdiskSource {
    /// Interpret a command-line value, honouring the [`NO_RAMDISK`] sentinel.
    pub fn from_arg(value: &Path) -> Self {
        if value.as_os_str() == NO_RAMDISK {
            RamdiskSource::None
        } else {
            RamdiskSource::File(value.to_path_buf())
        }
    }
}

/// Component buffers ready for [`crate::pack::pack`].
#[derive(Debug, Clone, Default)]
pub struct ImageInputs {
    pub kernel: Vec<u8>,
    pub ramdisk: Option<Vec<u8>>,
    pub second: Option<Vec<u8>>,
}

impl ImageInputs {
    /// Read the kernel, ramdisk, and optional second stage.
    pub fn load(kernel: &Path, ramdisk: &RamdiskSource, second: Option<&Path>) -> Result<Self> {
        let kernel = load_file("kernel", kernel)?;
        let ramdisk = match ramdisk {
            RamdiskSource::None => None,
            RamdiskSource::File(path) => Some(load_file("ramdisk", path)?),
        };
        let second = second
            .map(|path| load_file("secondstage", path))
            .transpose()?;

        Ok(Self {
            kernel,
            ramdisk,
            second,
        })
    }
}

/// Read a whole file, mapping any failure to [`BootImageError::MissingInput`].
pub fn load_file(what: &'static str, path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| BootImageError::MissingInput {
        what,
        path: path.to_path_buf(),
        source,
    })
}
