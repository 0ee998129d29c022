//! Header id computation.
//!
//! The id lets a bootloader tell images apart by reading only the first
//! page. It is a SHA-1 over the payloads and their sizes; the Rockchip
//! profile also hashes most of the header. Nothing checks it on read.

use sha1::{Digest, Sha1};

use crate::header::{CommandLine, ProductName, BOOT_ID_SIZE};

/// Header fields hashed after the payloads for the Rockchip profile.
#[derive(Debug, Clone)]
pub struct ExtraFields<'a> {
    pub tags_addr: u32,
    pub page_size: u32,
    pub reserved: [u32; 2],
    pub product_name: &'a ProductName,
    pub command_line: &'a CommandLine,
}

/// Compute the 32-byte header id.
///
/// Section sizes are hashed as 32-bit little-endian values; callers ensure
/// every section fits in `u32` before calling.
pub fn compute_id(
    kernel: &[u8],
    ramdisk: &[u8],
    second: &[u8],
    extra: Option<&ExtraFields<'_>>,
) -> [u8; BOOT_ID_SIZE] {
    let mut hasher = Sha1::new();
    for section in [kernel, ramdisk, second] {
        hasher.update(section);
        hasher.update((section.len() as u32).to_le_bytes());
    }

    if let Some(extra) = extra {
        hasher.update(extra.tags_addr.to_le_bytes());
        hasher.update(extra.page_size.to_le_bytes());
        hasher.update(extra.reserved[0].to_le_bytes());
        hasher.update(extra.reserved[1].to_le_bytes());
        hasher.update(extra.product_name.as_raw());
        hasher.update(extra.command_line.as_raw());
    }

    let digest = hasher.finalize();
    let mut id = [0u8; BOOT_ID_SIZE];
    let n = digest.len().min(BOOT_ID_SIZE);
    id[..n].copy_from_slice(&digest[..n]);
    id
}
