//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::profile::Profile;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show built-in profiles
    Profiles,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => config.print(),
        ShowTarget::Profiles => {
            for profile in [Profile::Normal, Profile::RockchipVariant] {
                let c = profile.consts();
                println!("{profile}:");
                println!("  base:     {:#010x}", c.default_base);
                println!("  page:     {}", c.default_page_size);
                println!("  kernel:   +{:#010x}", c.kernel_addr_offset);
                println!("  ramdisk:  +{:#010x}", c.ramdisk_addr_offset);
                println!("  second:   +{:#010x}", c.second_addr_offset);
                println!("  tags:     +{:#010x}", c.tags_addr_offset);
            }
        }
    }
    Ok(())
}
