//! Configuration loaded from the process environment.
//!
//! These mutate process-wide environment variables, so they run serially.

use bootimg::config::{Config, ENV_BOARD, ENV_OUTPUT_DIR, ENV_TYPE};
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    for key in [ENV_TYPE, ENV_OUTPUT_DIR, ENV_BOARD] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_defaults_from_empty_environment() {
    clear_env();
    let config = Config::load();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_load_reads_environment() {
    clear_env();
    std::env::set_var(ENV_TYPE, "RTK");
    std::env::set_var(ENV_OUTPUT_DIR, "unpacked");
    std::env::set_var(ENV_BOARD, "rk3188");

    let config = Config::load();
    clear_env();

    assert_eq!(config.image_type, "RTK");
    assert_eq!(config.output_dir, PathBuf::from("unpacked"));
    assert_eq!(config.board, "rk3188");
}
