//! Configuration management for bootimg.
//!
//! Defaults come from environment variables, which `main` seeds from a `.env`
//! file via dotenvy. Command-line flags override everything here.

use std::path::PathBuf;

use crate::profile::Profile;

/// Environment variable holding the default image type (`rtk` or `norm`).
pub const ENV_TYPE: &str = "BOOTIMG_TYPE";
/// Environment variable holding the default unpack directory.
pub const ENV_OUTPUT_DIR: &str = "BOOTIMG_OUTPUT_DIR";
/// Environment variable holding the default board name for `pack`.
pub const ENV_BOARD: &str = "BOOTIMG_BOARD";

/// bootimg configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Image type used when `--type` is not given (default: norm)
    pub image_type: String,
    /// Where `unpack` writes files (default: current directory)
    pub output_dir: PathBuf,
    /// Board name used when `--board` is not given (default: empty)
    pub board: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_type: Profile::Normal.name().to_string(),
            output_dir: PathBuf::from("."),
            board: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            image_type: get(ENV_TYPE)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.image_type),
            output_dir: get(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            board: get(ENV_BOARD).unwrap_or(defaults.board),
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  {ENV_TYPE}: {}", self.image_type);
        println!("  {ENV_OUTPUT_DIR}: {}", self.output_dir.display());
        println!("  {ENV_BOARD}: {:?}", self.board);
        match Profile::resolve_strict(&self.image_type) {
            Ok(profile) => {
                let c = profile.consts();
                println!(
                    "  Profile {profile}: base {:#010x}, page size {}",
                    c.default_base, c.default_page_size
                );
            }
            Err(e) => println!("  Profile: INVALID ({e}); pack will refuse it"),
        }
    }
}
