//! Unpack command - splits a boot image into section and metadata files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::profile::Profile;
use crate::timing::Timer;
use crate::unpack::{unpack, UnpackedImage};

/// Unpack `input` into `output_dir`, returning every file written.
///
/// Files are named after the input's basename: `<img>-cmdline`, `<img>-base`,
/// `<img>-pagesize`, `<img>-board`, `<img>-zImage`, `<img>-ramdisk.gz`, and
/// `<img>-second` when the image carries a second stage.
pub fn cmd_unpack(
    input: &Path,
    output_dir: &Path,
    page_size: Option<u32>,
    profile: Profile,
) -> Result<Vec<PathBuf>> {
    let image =
        fs::read(input).with_context(|| format!("could not read image '{}'", input.display()))?;
    let stem = input
        .file_name()
        .with_context(|| format!("'{}' has no file name", input.display()))?
        .to_string_lossy()
        .into_owned();

    let timer = Timer::start("Parse image");
    let unpacked = unpack(&image, page_size, profile)
        .with_context(|| format!("unpacking '{}'", input.display()))?;
    timer.finish();

    print_board_info(&unpacked);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory '{}'", output_dir.display()))?;

    let mut written = Vec::new();
    for (suffix, contents) in sidecars(&unpacked) {
        written.push(write_output(output_dir, &stem, suffix, contents.as_bytes())?);
    }
    written.push(write_output(output_dir, &stem, "zImage", &unpacked.kernel)?);
    written.push(write_output(output_dir, &stem, "ramdisk.gz", &unpacked.ramdisk)?);
    if unpacked.has_second() {
        written.push(write_output(output_dir, &stem, "second", &unpacked.second)?);
    }

    println!("Extracted {} files to {}", written.len(), output_dir.display());
    Ok(written)
}

fn print_board_info(unpacked: &UnpackedImage) {
    println!("BOARD_KERNEL_CMDLINE {}", unpacked.command_line);
    println!("BOARD_KERNEL_BASE {:08x}", unpacked.base);
    println!("BOARD_PAGE_SIZE {}", unpacked.header.page_size);
    println!("BOARD_NAME {}", unpacked.product_name);
}

/// Text metadata files, one value per file followed by a newline.
fn sidecars(unpacked: &UnpackedImage) -> [(&'static str, String); 4] {
    [
        ("cmdline", format!("{}\n", unpacked.command_line)),
        ("base", format!("{:08x}\n", unpacked.base)),
        ("pagesize", format!("{}\n", unpacked.header.page_size)),
        ("board", format!("{}\n", unpacked.product_name)),
    ]
}

fn write_output(dir: &Path, stem: &str, suffix: &str, contents: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}-{suffix}"));
    fs::write(&path, contents).with_context(|| format!("writing '{}'", path.display()))?;
    Ok(path)
}
