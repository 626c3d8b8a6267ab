//! Command-line interface

pub mod commands;

pub use commands::{
    cmd_check, cmd_config_show, cmd_effective, cmd_init, cmd_params_validate, AppState, CliResult,
};
