//! Errors produced by the boot image core.
//!
//! The core never prints or exits; every failure is returned as a
//! [`BootImageError`] and the CLI decides how to render it.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while building, reading, or loading the parts of a boot image.
#[derive(Debug, Error)]
pub enum BootImageError {
    /// A required component file is absent or could not be read.
    #[error("could not load {what} '{}'", .path.display())]
    MissingInput {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixed-capacity header string is too long to fit with its terminator.
    #[error("{field} too large: {len} bytes, at most {max} allowed")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A header string contains a NUL byte and could not be read back intact.
    #[error("{field} contains a NUL byte")]
    InvalidString { field: &'static str },

    /// Page size outside the supported set (pack) or not a power of two (unpack).
    #[error("unsupported page size {0}")]
    UnsupportedPageSize(u32),

    /// Profile name not recognised while packing.
    #[error("unknown image type '{0}', expected 'rtk' or 'norm'")]
    UnknownProfile(String),

    /// Section too large for the 32-bit size field.
    #[error("{section} is {len} bytes, larger than the 4 GiB header limit")]
    SectionTooLarge { section: &'static str, len: usize },

    /// Buffer shorter than the fixed header.
    #[error("image is {len} bytes, shorter than the {need}-byte header")]
    TruncatedHeader { len: usize, need: usize },

    /// The header does not start with the boot magic.
    #[error("bad magic {0:02x?}, not a boot image")]
    BadMagic([u8; 8]),

    /// Buffer shorter than the section sizes declared in the header.
    #[error("{section} needs bytes {start}..{end} but image is only {len} bytes")]
    TruncatedPayload {
        section: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, BootImageError>;
