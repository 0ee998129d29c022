//! Splitting a boot image back into its components.
//!
//! The header id is not checked here. [`verify_id`] exists for callers that
//! want to report on it.

use crate::align::padded_len;
use crate::digest::{compute_id, ExtraFields};
use crate::error::{BootImageError, Result};
use crate::header::{BootHeader, HEADER_SIZE};
use crate::profile::Profile;

/// Smallest page size accepted from an image header.
pub const MIN_PAGE_SIZE: u32 = 2048;

/// Components and metadata recovered from an image.
#[derive(Debug, Clone)]
pub struct UnpackedImage {
    pub header: BootHeader,
    /// Page size used to locate the sections.
    pub page_size: u32,
    /// `kernel_addr` minus the profile's kernel offset.
    pub base: u32,
    pub kernel: Vec<u8>,
    pub ramdisk: Vec<u8>,
    /// Empty when the image has no second stage.
    pub second: Vec<u8>,
    pub product_name: String,
    pub command_line: String,
}

impl UnpackedImage {
    pub fn has_second(&self) -> bool {
        self.header.second_size > 0
    }
}

/// Slice a section of `len` bytes at `start`, returning the offset past its padding.
///
/// An empty section needs no bytes, so `start` may lie past the end of `image`.
fn take_section<'a>(
    image: &'a [u8],
    section: &'static str,
    start: usize,
    len: u32,
    page_size: u32,
) -> Result<(&'a [u8], usize)> {
    if len == 0 {
        return Ok((&image[..0], start));
    }
    let end = start.saturating_add(len as usize);
    let data = image
        .get(start..end)
        .ok_or(BootImageError::TruncatedPayload {
            section,
            start,
            end,
            len: image.len(),
        })?;
    Ok((data, start.saturating_add(padded_len(len, page_size))))
}

/// Parse the header and check the magic.
pub fn read_header(image: &[u8]) -> Result<BootHeader> {
    let header = BootHeader::decode(image)?;
    if !header.has_valid_magic() {
        return Err(BootImageError::BadMagic(header.magic));
    }
    Ok(header)
}

/// Split `image` into header, kernel, ramdisk and second stage.
///
/// `page_size_override` replaces the header's page size when locating
/// sections. `profile` only affects the recovered base address.
pub fn unpack(
    image: &[u8],
    page_size_override: Option<u32>,
    profile: Profile,
) -> Result<UnpackedImage> {
    let header = read_header(image)?;

    let page_size = match page_size_override {
        Some(size) if size.is_power_of_two() => size,
        None if header.page_size.is_power_of_two() && header.page_size >= MIN_PAGE_SIZE => {
            header.page_size
        }
        Some(size) => return Err(BootImageError::UnsupportedPageSize(size)),
        None => return Err(BootImageError::UnsupportedPageSize(header.page_size)),
    };

    let offset = padded_len(HEADER_SIZE as u32, page_size);
    let (kernel, offset) = take_section(image, "kernel", offset, header.kernel_size, page_size)?;
    let (ramdisk, offset) =
        take_section(image, "ramdisk", offset, header.ramdisk_size, page_size)?;
    let second: &[u8] = if header.second_size > 0 {
        take_section(image, "secondstage", offset, header.second_size, page_size)?.0
    } else {
        &[]
    };

    Ok(UnpackedImage {
        page_size,
        base: header
            .kernel_addr
            .wrapping_sub(profile.consts().kernel_addr_offset),
        kernel: kernel.to_vec(),
        ramdisk: ramdisk.to_vec(),
        second: second.to_vec(),
        product_name: header.product_name.to_string_lossy(),
        command_line: header.command_line.to_string_lossy(),
        header,
    })
}

/// Recompute the id and compare it with the one stored in the header.
pub fn verify_id(image: &[u8], profile: Profile) -> Result<bool> {
    let unpacked = unpack(image, None, profile)?;
    let hdr = &unpacked.header;
    let extra = match profile {
        Profile::RockchipVariant => Some(ExtraFields {
            tags_addr: hdr.tags_addr,
            page_size: hdr.page_size,
            reserved: hdr.reserved,
            product_name: &hdr.product_name,
            command_line: &hdr.command_line,
        }),
        Profile::Normal => None,
    };
    let id = compute_id(
        &unpacked.kernel,
        &unpacked.ramdisk,
        &unpacked.second,
        extra.as_ref(),
    );
    Ok(id == hdr.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{pack, PackConfig, SecondPadding};

    fn sample(profile: Profile) -> Vec<u8> {
        let config = PackConfig {
            command_line: "console=ttyS0 quiet".into(),
            product_name: "board".into(),
            ..PackConfig::new(profile)
        };
        pack(&[0x11; 5000], Some(&[0x22; 300]), Some(&[0x33; 40]), &config).unwrap()
    }

    #[test]
    fn test_unpack_recovers_everything() {
        let out = unpack(&sample(Profile::Normal), None, Profile::Normal).unwrap();
        assert_eq!(out.kernel, vec![0x11; 5000]);
        assert_eq!(out.ramdisk, vec![0x22; 300]);
        assert_eq!(out.second, vec![0x33; 40]);
        assert!(out.has_second());
        assert_eq!(out.base, 0x1000_0000);
        assert_eq!(out.page_size, 2048);
        assert_eq!(out.product_name, "board");
        assert_eq!(out.command_line, "console=ttyS0 quiet");
    }

    #[test]
    fn test_small_image_round_trip() {
        let config = PackConfig {
            explicit_page_size: Some(2048),
            ..PackConfig::new(Profile::Normal)
        };
        let image = pack(&[1, 2, 3, 4], Some(&[]), None, &config).unwrap();
        let out = unpack(&image, None, Profile::Normal).unwrap();
        assert_eq!(out.kernel, [1, 2, 3, 4]);
        assert!(out.ramdisk.is_empty());
        assert!(!out.has_second());
    }

    #[test]
    fn test_base_depends_on_profile() {
        let image = sample(Profile::RockchipVariant);
        let rk = unpack(&image, None, Profile::RockchipVariant).unwrap();
        assert_eq!(rk.base, 0x6000_0000);
        // Wrong profile still unpacks, base is just offset differently.
        let norm = unpack(&image, None, Profile::Normal).unwrap();
        assert_eq!(norm.base, 0x6040_8000 - 0x8000);
        assert_eq!(norm.kernel, rk.kernel);
    }

    #[test]
    fn test_truncated_header() {
        let image = sample(Profile::Normal);
        let err = unpack(&image[..100], None, Profile::Normal).unwrap_err();
        assert!(matches!(err, BootImageError::TruncatedHeader { len: 100, .. }));
    }

    #[test]
    fn test_truncated_kernel() {
        let hdr = BootHeader {
            kernel_size: 10_000,
            page_size: 2048,
            ..BootHeader::default()
        };
        let mut image = hdr.encode().to_vec();
        image.resize(4096, 0);

        let err = unpack(&image, None, Profile::Normal).unwrap_err();
        assert!(matches!(
            err,
            BootImageError::TruncatedPayload { section: "kernel", .. }
        ));
    }

    #[test]
    fn test_truncated_second_stage() {
        let image = sample(Profile::Normal);
        let cut = image.len() - 2048 + 10;
        let err = unpack(&image[..cut], None, Profile::Normal).unwrap_err();
        assert!(matches!(
            err,
            BootImageError::TruncatedPayload { section: "secondstage", .. }
        ));
    }

    #[test]
    fn test_trailing_padding_optional() {
        // Image cut right after the last section byte still unpacks.
        let config = PackConfig::new(Profile::Normal);
        let image = pack(b"kernel", Some(b"ramdisk"), None, &config).unwrap();
        let cut = 2048 * 2 + 7;
        let out = unpack(&image[..cut], None, Profile::Normal).unwrap();
        assert_eq!(out.ramdisk, b"ramdisk");
    }

    #[test]
    fn test_image_cut_after_kernel_with_empty_ramdisk() {
        let image = pack(&[1, 2, 3, 4], None, None, &PackConfig::new(Profile::Normal)).unwrap();
        let out = unpack(&image[..2052], None, Profile::Normal).unwrap();
        assert_eq!(out.kernel, [1, 2, 3, 4]);
        assert!(out.ramdisk.is_empty());
        assert!(!out.has_second());
    }

    #[test]
    fn test_bad_magic() {
        let mut image = sample(Profile::Normal);
        image[0] = b'X';
        assert!(matches!(
            unpack(&image, None, Profile::Normal),
            Err(BootImageError::BadMagic(_))
        ));
    }

    #[test]
    fn test_invalid_page_size() {
        let image = sample(Profile::Normal);
        assert!(matches!(
            unpack(&image, Some(3000), Profile::Normal),
            Err(BootImageError::UnsupportedPageSize(3000))
        ));

        let mut zero_page = image.clone();
        zero_page[36..40].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            unpack(&zero_page, None, Profile::Normal),
            Err(BootImageError::UnsupportedPageSize(0))
        ));
    }

    #[test]
    fn test_header_page_size_below_minimum() {
        let image = sample(Profile::Normal);
        for size in [1u32, 4, 1024] {
            let mut small = image.clone();
            small[36..40].copy_from_slice(&size.to_le_bytes());
            assert!(matches!(
                unpack(&small, None, Profile::Normal),
                Err(BootImageError::UnsupportedPageSize(s)) if s == size
            ));
        }
        // An explicit override is only held to a power of two.
        let mut small = image.clone();
        small[36..40].copy_from_slice(&1024u32.to_le_bytes());
        assert!(unpack(&small, Some(2048), Profile::Normal).is_ok());
    }

    #[test]
    fn test_page_size_override_is_used() {
        let config = PackConfig {
            explicit_page_size: Some(4096),
            ..PackConfig::new(Profile::Normal)
        };
        let image = pack(b"kernel", Some(b"rd"), None, &config).unwrap();
        let mut lying = image.clone();
        lying[36..40].copy_from_slice(&2048u32.to_le_bytes());

        let wrong = unpack(&lying, None, Profile::Normal).unwrap();
        assert_ne!(wrong.kernel, b"kernel");
        let right = unpack(&lying, Some(4096), Profile::Normal).unwrap();
        assert_eq!(right.kernel, b"kernel");
        assert_eq!(right.page_size, 4096);
    }

    #[test]
    fn test_legacy_second_stage_still_unpacks() {
        let config = PackConfig {
            second_padding: SecondPadding::Legacy,
            ..PackConfig::new(Profile::Normal)
        };
        let image = pack(b"k", Some(&[1; 100]), Some(&[2; 10]), &config).unwrap();
        let out = unpack(&image, None, Profile::Normal).unwrap();
        assert_eq!(out.second, [2; 10]);
    }

    #[test]
    fn test_digest_not_checked_on_unpack() {
        let mut image = sample(Profile::Normal);
        image[HEADER_SIZE - 1] ^= 0xFF;
        image[576] ^= 0xFF;
        assert!(unpack(&image, None, Profile::Normal).is_ok());
        assert!(!verify_id(&image, Profile::Normal).unwrap());
    }

    #[test]
    fn test_verify_id() {
        assert!(verify_id(&sample(Profile::Normal), Profile::Normal).unwrap());
        let rk = sample(Profile::RockchipVariant);
        assert!(verify_id(&rk, Profile::RockchipVariant).unwrap());
        assert!(!verify_id(&rk, Profile::Normal).unwrap());
    }
}
