//! Boot image header codec.
//!
//! The header is a 608-byte little-endian record at offset 0 of every image:
//!
//! ```text
//!   0  magic[8]          "ANDROID!"
//!   8  kernel_size       kernel_addr
//!  16  ramdisk_size      ramdisk_addr
//!  24  second_size       second_addr
//!  32  tags_addr         page_size
//!  40  reserved[2]
//!  48  product_name[16]
//!  64  command_line[512]
//! 576  id[32]
//! ```
//!
//! Fields are read and written one at a time at fixed offsets, so the
//! in-memory struct layout never leaks onto the wire.

use crate::error::{BootImageError, Result};

/// Boot magic, no terminator.
pub const BOOT_MAGIC: [u8; 8] = *b"ANDROID!";
pub const BOOT_NAME_SIZE: usize = 16;
pub const BOOT_ARGS_SIZE: usize = 512;
pub const BOOT_ID_SIZE: usize = 32;

/// Encoded header size in bytes.
pub const HEADER_SIZE: usize = 8 + 10 * 4 + BOOT_NAME_SIZE + BOOT_ARGS_SIZE + BOOT_ID_SIZE;

const OFF_KERNEL_SIZE: usize = 8;
const OFF_KERNEL_ADDR: usize = 12;
const OFF_RAMDISK_SIZE: usize = 16;
const OFF_RAMDISK_ADDR: usize = 20;
const OFF_SECOND_SIZE: usize = 24;
const OFF_SECOND_ADDR: usize = 28;
const OFF_TAGS_ADDR: usize = 32;
const OFF_PAGE_SIZE: usize = 36;
const OFF_RESERVED: usize = 40;
const OFF_NAME: usize = 48;
const OFF_CMDLINE: usize = OFF_NAME + BOOT_NAME_SIZE;
const OFF_ID: usize = OFF_CMDLINE + BOOT_ARGS_SIZE;

/// NUL-terminated string stored in an `N`-byte field.
///
/// Holds at most `N - 1` bytes so a terminator always fits. Decoding stops at
/// the first NUL or at `N`, whichever comes first.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// Longest content that still leaves room for the terminator.
    pub const MAX_LEN: usize = N - 1;

    /// Empty string.
    pub const fn empty() -> Self {
        Self { bytes: [0; N] }
    }

    /// Build from content, rejecting anything over capacity.
    ///
    /// `field` names the header field in the error.
    pub fn new(field: &'static str, content: &[u8]) -> Result<Self> {
        if content.len() > Self::MAX_LEN {
            return Err(BootImageError::FieldTooLong {
                field,
                len: content.len(),
                max: Self::MAX_LEN,
            });
        }
        if content.contains(&0) {
            return Err(BootImageError::InvalidString { field });
        }
        let mut bytes = [0; N];
        bytes[..content.len()].copy_from_slice(content);
        Ok(Self { bytes })
    }

    /// Take a raw field as read from an image.
    pub fn from_raw(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Full zero-padded field.
    pub fn as_raw(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Content up to the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(N);
        &self.bytes[..end]
    }

    /// Content for display; invalid UTF-8 is replaced.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> std::fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

pub type ProductName = FixedStr<BOOT_NAME_SIZE>;
pub type CommandLine = FixedStr<BOOT_ARGS_SIZE>;

/// Decoded boot image header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootHeader {
    pub magic: [u8; 8],
    pub kernel_size: u32,
    pub kernel_addr: u32,
    pub ramdisk_size: u32,
    pub ramdisk_addr: u32,
    pub second_size: u32,
    pub second_addr: u32,
    pub tags_addr: u32,
    pub page_size: u32,
    /// Written as zero, ignored on read.
    pub reserved: [u32; 2],
    pub product_name: ProductName,
    pub command_line: CommandLine,
    /// Leading bytes of the content digest, zero filled.
    pub id: [u8; BOOT_ID_SIZE],
}

impl Default for BootHeader {
    fn default() -> Self {
        Self {
            magic: BOOT_MAGIC,
            kernel_size: 0,
            kernel_addr: 0,
            ramdisk_size: 0,
            ramdisk_addr: 0,
            second_size: 0,
            second_addr: 0,
            tags_addr: 0,
            page_size: 0,
            reserved: [0; 2],
            product_name: ProductName::empty(),
            command_line: CommandLine::empty(),
            id: [0; BOOT_ID_SIZE],
        }
    }
}

fn put_u32(buf: &mut [u8; HEADER_SIZE], off: usize, value: u32) {
    buf[off..off + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

fn get_array<const N: usize>(buf: &[u8], off: usize) -> [u8; N] {
    let mut out = [0; N];
    out.copy_from_slice(&buf[off..off + N]);
    out
}

impl BootHeader {
    /// Serialize to the fixed wire layout.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..8].copy_from_slice(&self.magic);
        put_u32(&mut buf, OFF_KERNEL_SIZE, self.kernel_size);
        put_u32(&mut buf, OFF_KERNEL_ADDR, self.kernel_addr);
        put_u32(&mut buf, OFF_RAMDISK_SIZE, self.ramdisk_size);
        put_u32(&mut buf, OFF_RAMDISK_ADDR, self.ramdisk_addr);
        put_u32(&mut buf, OFF_SECOND_SIZE, self.second_size);
        put_u32(&mut buf, OFF_SECOND_ADDR, self.second_addr);
        put_u32(&mut buf, OFF_TAGS_ADDR, self.tags_addr);
        put_u32(&mut buf, OFF_PAGE_SIZE, self.page_size);
        put_u32(&mut buf, OFF_RESERVED, self.reserved[0]);
        put_u32(&mut buf, OFF_RESERVED + 4, self.reserved[1]);
        buf[OFF_NAME..OFF_CMDLINE].copy_from_slice(self.product_name.as_raw());
        buf[OFF_CMDLINE..OFF_ID].copy_from_slice(self.command_line.as_raw());
        buf[OFF_ID..].copy_from_slice(&self.id);
        buf
    }

    /// Parse the header at the start of `buf`.
    ///
    /// Only the length is checked here; the magic is left to the caller.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(BootImageError::TruncatedHeader {
                len: buf.len(),
                need: HEADER_SIZE,
            });
        }
        Ok(Self {
            magic: get_array(buf, 0),
            kernel_size: get_u32(buf, OFF_KERNEL_SIZE),
            kernel_addr: get_u32(buf, OFF_KERNEL_ADDR),
            ramdisk_size: get_u32(buf, OFF_RAMDISK_SIZE),
            ramdisk_addr: get_u32(buf, OFF_RAMDISK_ADDR),
            second_size: get_u32(buf, OFF_SECOND_SIZE),
            second_addr: get_u32(buf, OFF_SECOND_ADDR),
            tags_addr: get_u32(buf, OFF_TAGS_ADDR),
            page_size: get_u32(buf, OFF_PAGE_SIZE),
            reserved: [get_u32(buf, OFF_RESERVED), get_u32(buf, OFF_RESERVED + 4)],
            product_name: FixedStr::from_raw(get_array(buf, OFF_NAME)),
            command_line: FixedStr::from_raw(get_array(buf, OFF_CMDLINE)),
            id: get_array(buf, OFF_ID),
        })
    }

    /// True when the magic matches [`BOOT_MAGIC`].
    pub fn has_valid_magic(&self) -> bool {
        self.magic == BOOT_MAGIC
    }

    /// Id as lowercase hex.
    pub fn id_hex(&self) -> String {
        self.id.iter().map(|b| format!("{b:02x}")).collect()
    }
}
