//! Info command - prints the header of a boot image.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::profile::Profile;
use crate::unpack::{read_header, verify_id};

/// Execute the info command.
pub fn cmd_info(input: &Path, profile: Profile) -> Result<()> {
    let image =
        fs::read(input).with_context(|| format!("could not read image '{}'", input.display()))?;
    let hdr = read_header(&image).with_context(|| format!("reading '{}'", input.display()))?;

    println!("{}:", input.display());
    println!("  type:         {profile}");
    println!("  kernel:       {:>10} bytes @ {:#010x}", hdr.kernel_size, hdr.kernel_addr);
    println!("  ramdisk:      {:>10} bytes @ {:#010x}", hdr.ramdisk_size, hdr.ramdisk_addr);
    println!("  second:       {:>10} bytes @ {:#010x}", hdr.second_size, hdr.second_addr);
    println!("  tags:         {:#010x}", hdr.tags_addr);
    println!("  page size:    {}", hdr.page_size);
    println!(
        "  base:         {:#010x}",
        hdr.kernel_addr
            .wrapping_sub(profile.consts().kernel_addr_offset)
    );
    println!("  board:        {:?}", hdr.product_name.to_string_lossy());
    println!("  cmdline:      {:?}", hdr.command_line.to_string_lossy());
    println!("  id:           {}", hdr.id_hex());

    // The id is informational; a mismatch is reported, not fatal.
    match verify_id(&image, profile) {
        Ok(true) => println!("  id check:     OK"),
        Ok(false) => println!("  id check:     MISMATCH (wrong --type, or image modified)"),
        Err(e) => eprintln!("  [WARN] Could not check id: {e}"),
    }

    println!("  sha256:       {:x}", Sha256::digest(&image));
    Ok(())
}
