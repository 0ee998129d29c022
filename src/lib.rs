//! Boot image packing and unpacking.
//!
//! A boot image bundles a kernel, a ramdisk, and an optional second-stage
//! loader behind one fixed-size header, each piece padded to the page size:
//!
//! ```text
//! +-----------------+
//! | boot header     | 1 page
//! +-----------------+
//! | kernel          | n pages
//! +-----------------+
//! | ramdisk         | m pages
//! +-----------------+
//! | second stage    | o pages (optional)
//! +-----------------+
//! ```
//!
//! Load addresses in the header are derived from a base address and the
//! offsets of a hardware [`Profile`].
//!
//! # Example
//!
//! ```rust
//! use bootimg::{pack, unpack, PackConfig, Profile};
//!
//! let config = PackConfig::new(Profile::Normal);
//! let image = pack(b"kernel", Some(b"ramdisk"), None, &config).unwrap();
//! let out = unpack(&image, None, Profile::Normal).unwrap();
//! assert_eq!(out.kernel, b"kernel");
//! ```

pub mod align;
pub mod commands;
pub mod config;
pub mod digest;
pub mod error;
pub mod header;
pub mod input;
pub mod pack;
pub mod profile;
pub mod timing;
pub mod unpack;

pub use error::BootImageError;
pub use header::{BootHeader, HEADER_SIZE};
pub use pack::{pack, PackConfig, SecondPadding};
pub use profile::Profile;
pub use unpack::{unpack, UnpackedImage};
