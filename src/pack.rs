//! Assembling a boot image from its components.

use crate::align::{pad_len, padded_len, write_padding};
use crate::digest::{compute_id, ExtraFields};
use crate::error::{BootImageError, Result};
use crate::header::{BootHeader, CommandLine, ProductName, BOOT_MAGIC, HEADER_SIZE};
use crate::profile::Profile;

/// Page sizes accepted as an explicit override.
pub const SUPPORTED_PAGE_SIZES: [u32; 3] = [2048, 4096, 16384];

/// How the padding after the second stage is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondPadding {
    /// Pad from the second-stage size; the image stays page aligned.
    #[default]
    Exact,
    /// Pad from the ramdisk size, as older mkbootimg builds did.
    ///
    /// Produces byte-identical output to those tools. The image length is
    /// then only page aligned when both sizes share a remainder.
    Legacy,
}

/// Everything that shapes the header apart from the payloads.
#[derive(Debug, Clone, Default)]
pub struct PackConfig {
    pub profile: Profile,
    pub explicit_base: Option<u32>,
    pub explicit_page_size: Option<u32>,
    pub explicit_ramdisk_addr: Option<u32>,
    pub command_line: String,
    pub product_name: String,
    pub second_padding: SecondPadding,
}

impl PackConfig {
    /// Config with profile defaults and empty strings.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Base address after applying the override.
    pub fn base(&self) -> u32 {
        self.explicit_base
            .unwrap_or(self.profile.consts().default_base)
    }

    /// Page size after applying and checking the override.
    pub fn page_size(&self) -> Result<u32> {
        match self.explicit_page_size {
            Some(size) if SUPPORTED_PAGE_SIZES.contains(&size) => Ok(size),
            Some(size) => Err(BootImageError::UnsupportedPageSize(size)),
            None => Ok(self.profile.consts().default_page_size),
        }
    }

    /// Header with addresses, page size and strings filled in.
    ///
    /// Section sizes and the id are left zero.
    pub fn header_template(&self) -> Result<BootHeader> {
        let consts = self.profile.consts();
        let base = self.base();

        Ok(BootHeader {
            magic: BOOT_MAGIC,
            kernel_addr: base.wrapping_add(consts.kernel_addr_offset),
            ramdisk_addr: self
                .explicit_ramdisk_addr
                .unwrap_or_else(|| base.wrapping_add(consts.ramdisk_addr_offset)),
            second_addr: base.wrapping_add(consts.second_addr_offset),
            tags_addr: base.wrapping_add(consts.tags_addr_offset),
            page_size: self.page_size()?,
            product_name: ProductName::new("board name", self.product_name.as_bytes())?,
            command_line: CommandLine::new("kernel commandline", self.command_line.as_bytes())?,
            ..BootHeader::default()
        })
    }
}

fn section_size(section: &'static str, data: &[u8]) -> Result<u32> {
    u32::try_from(data.len()).map_err(|_| BootImageError::SectionTooLarge {
        section,
        len: data.len(),
    })
}

/// Build the header for the given payloads, including the id.
pub fn build_header(
    kernel: &[u8],
    ramdisk: &[u8],
    second: &[u8],
    config: &PackConfig,
) -> Result<BootHeader> {
    let mut hdr = config.header_template()?;
    hdr.kernel_size = section_size("kernel", kernel)?;
    hdr.ramdisk_size = section_size("ramdisk", ramdisk)?;
    hdr.second_size = section_size("secondstage", second)?;

    let extra = match config.profile {
        Profile::RockchipVariant => Some(ExtraFields {
            tags_addr: hdr.tags_addr,
            page_size: hdr.page_size,
            reserved: hdr.reserved,
            product_name: &hdr.product_name,
            command_line: &hdr.command_line,
        }),
        Profile::Normal => None,
    };
    hdr.id = compute_id(kernel, ramdisk, second, extra.as_ref());
    Ok(hdr)
}

/// Assemble a complete boot image.
///
/// A `None` ramdisk is packed as an empty section. A `Some` second stage is
/// always written, even when empty.
pub fn pack(
    kernel: &[u8],
    ramdisk: Option<&[u8]>,
    second: Option<&[u8]>,
    config: &PackConfig,
) -> Result<Vec<u8>> {
    let ramdisk = ramdisk.unwrap_or_default();
    let hdr = build_header(kernel, ramdisk, second.unwrap_or_default(), config)?;
    let page = hdr.page_size;

    let mut out = Vec::with_capacity(
        padded_len(HEADER_SIZE as u32, page)
            + padded_len(hdr.kernel_size, page)
            + padded_len(hdr.ramdisk_size, page)
            + padded_len(hdr.second_size, page),
    );

    out.extend_from_slice(&hdr.encode());
    write_padding(&mut out, pad_len(HEADER_SIZE as u32, page));

    out.extend_from_slice(kernel);
    write_padding(&mut out, pad_len(hdr.kernel_size, page));

    out.extend_from_slice(ramdisk);
    write_padding(&mut out, pad_len(hdr.ramdisk_size, page));

    if let Some(second) = second {
        out.extend_from_slice(second);
        let padded_from = match config.second_padding {
            SecondPadding::Exact => hdr.second_size,
            SecondPadding::Legacy => hdr.ramdisk_size,
        };
        write_padding(&mut out, pad_len(padded_from, page));
    }

    Ok(out)
}
