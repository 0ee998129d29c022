//! Pack command - builds a boot image from kernel, ramdisk and second stage.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::input::{ImageInputs, RamdiskSource};
use crate::pack::{pack, PackConfig};
use crate::timing::Timer;

/// Files and header options for one pack run.
pub struct PackRequest {
    pub kernel: PathBuf,
    pub ramdisk: RamdiskSource,
    pub second: Option<PathBuf>,
    pub output: PathBuf,
    pub config: PackConfig,
}

/// Execute the pack command.
pub fn cmd_pack(request: &PackRequest) -> Result<()> {
    let timer = Timer::start("Load components");
    let inputs = ImageInputs::load(
        &request.kernel,
        &request.ramdisk,
        request.second.as_deref(),
    )?;
    timer.finish();

    let timer = Timer::start("Assemble image");
    let image = pack(
        &inputs.kernel,
        inputs.ramdisk.as_deref(),
        inputs.second.as_deref(),
        &request.config,
    )
    .context("building boot image header")?;
    timer.finish();

    if let Err(e) = fs::write(&request.output, &image) {
        // Never leave a half-written image behind.
        let _ = fs::remove_file(&request.output);
        return Err(e).with_context(|| format!("failed writing '{}'", request.output.display()));
    }

    let page = request.config.page_size()?;
    println!(
        "Packed {} ({} bytes, {} pages of {}, type {})",
        request.output.display(),
        image.len(),
        image.len().div_ceil(page as usize),
        page,
        request.config.profile
    );
    if matches!(request.ramdisk, RamdiskSource::None) {
        eprintln!("  [WARN] No ramdisk given; image has an empty ramdisk section");
    }
    Ok(())
}
