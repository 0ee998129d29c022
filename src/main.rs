//! bootimg - boot image packer and unpacker.
//!
//! Builds and splits page-aligned kernel/ramdisk boot images:
//! - pack: kernel + ramdisk (+ second stage) into one image
//! - unpack: image back into section files plus metadata sidecars
//! - info: header dump with id check

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use bootimg::commands::{self, parse_hex_u32, PackRequest};
use bootimg::config::Config;
use bootimg::input::RamdiskSource;
use bootimg::pack::{PackConfig, SecondPadding};
use bootimg::profile::Profile;

#[derive(Parser)]
#[command(name = "bootimg")]
#[command(about = "Boot image packer and unpacker")]
#[command(
    after_help = "QUICK START:\n  bootimg pack --kernel zImage --ramdisk ramdisk.gz -o boot.img\n  bootimg unpack -i boot.img -o out/\n  bootimg info -i boot.img"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a boot image
    Pack {
        /// Kernel image
        #[arg(long)]
        kernel: PathBuf,

        /// Ramdisk image, or NONE for an empty ramdisk
        #[arg(long)]
        ramdisk: PathBuf,

        /// Second-stage bootloader
        #[arg(long)]
        second: Option<PathBuf>,

        /// Image type: rtk (Rockchip addresses) or norm (default: $BOOTIMG_TYPE or norm)
        #[arg(short = 't', long = "type")]
        image_type: Option<String>,

        /// Kernel command line
        #[arg(long, default_value = "")]
        cmdline: String,

        /// Board name (default: $BOOTIMG_BOARD)
        #[arg(long)]
        board: Option<String>,

        /// Base address in hex
        #[arg(long, value_parser = parse_hex_u32)]
        base: Option<u32>,

        /// Page size: 2048, 4096 or 16384
        #[arg(long)]
        pagesize: Option<u32>,

        /// Ramdisk load address in hex
        #[arg(long, value_parser = parse_hex_u32)]
        ramdiskaddr: Option<u32>,

        /// Pad the second stage by the ramdisk size, like old mkbootimg builds
        #[arg(long)]
        legacy_second_padding: bool,

        /// Output image
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a boot image into its parts
    Unpack {
        /// Boot image to unpack
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (default: $BOOTIMG_OUTPUT_DIR or .)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page size in hex, overriding the header
        #[arg(short, long, value_parser = parse_hex_u32)]
        pagesize: Option<u32>,

        /// Image type: rtk or norm; anything else is treated as norm
        #[arg(short = 't', long = "type")]
        image_type: Option<String>,
    },

    /// Print a boot image header
    Info {
        /// Boot image to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Image type: rtk or norm; anything else is treated as norm
        #[arg(short = 't', long = "type")]
        image_type: Option<String>,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show built-in image types and their addresses
    Profiles,
}

/// Exit with `message` followed by the `pack` usage, as clap does for bad arguments.
fn pack_usage_error(message: impl std::fmt::Display) -> ! {
    let mut cli = Cli::command();
    // Building propagates the bin name so usage reads `bootimg pack`.
    cli.build();
    let mut pack = cli.find_subcommand("pack").cloned().unwrap_or(cli);
    pack.error(ErrorKind::InvalidValue, message).exit()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load();

    match cli.command {
        Commands::Pack {
            kernel,
            ramdisk,
            second,
            image_type,
            cmdline,
            board,
            base,
            pagesize,
            ramdiskaddr,
            legacy_second_padding,
            output,
        } => {
            let type_name = image_type.unwrap_or_else(|| config.image_type.clone());
            // Packing refuses unknown types; unpack and info fall back to norm.
            let profile = match Profile::resolve_strict(&type_name) {
                Ok(profile) => profile,
                Err(e) => pack_usage_error(e),
            };

            let request = PackRequest {
                ramdisk: RamdiskSource::from_arg(&ramdisk),
                kernel,
                second,
                output,
                config: PackConfig {
                    profile,
                    explicit_base: base,
                    explicit_page_size: pagesize,
                    explicit_ramdisk_addr: ramdiskaddr,
                    command_line: cmdline,
                    product_name: board.unwrap_or_else(|| config.board.clone()),
                    second_padding: if legacy_second_padding {
                        SecondPadding::Legacy
                    } else {
                        SecondPadding::Exact
                    },
                },
            };
            commands::cmd_pack(&request)?;
        }

        Commands::Unpack {
            input,
            output,
            pagesize,
            image_type,
        } => {
            let profile =
                Profile::resolve_lenient(Some(image_type.as_deref().unwrap_or(&config.image_type)));
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            commands::cmd_unpack(&input, &output_dir, pagesize, profile)?;
        }

        Commands::Info { input, image_type } => {
            let profile =
                Profile::resolve_lenient(Some(image_type.as_deref().unwrap_or(&config.image_type)));
            commands::cmd_info(&input, profile)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Profiles => commands::show::ShowTarget::Profiles,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
