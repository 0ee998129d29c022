//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `pack` - Build a boot image
//! - `unpack` - Split a boot image into files
//! - `info` - Print a boot image header
//! - `show` - Display configuration and profiles

pub mod info;
pub mod pack;
pub mod show;
pub mod unpack;

pub use info::cmd_info;
pub use pack::{cmd_pack, PackRequest};
pub use show::cmd_show;
pub use unpack::cmd_unpack;

/// Parse a hexadecimal `u32`, with or without a `0x` prefix.
pub fn parse_hex_u32(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{value}': {e}"))
}
