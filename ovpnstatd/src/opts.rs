/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Arg, ArgAction, Command, ValueHint, value_parser};

const GLOBAL_ARG_VERBOSE: &str = "verbose";
const GLOBAL_ARG_VERSION: &str = "version";
const GLOBAL_ARG_TEST_CONFIG: &str = "test-config";
const GLOBAL_ARG_CONFIG_FILE: &str = "config-file";

#[derive(Debug)]
pub struct ProcArgs {
    pub config_file: PathBuf,
    pub verbose_level: u8,
    pub test_config: bool,
}

/// Parse the command line. Returns `None` when the invocation was handled
/// in place (version output).
pub fn parse_clap() -> anyhow::Result<Option<ProcArgs>> {
    let args = Command::new(crate::build::PKG_NAME)
        .disable_version_flag(true)
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("Show verbose output")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .long(GLOBAL_ARG_VERBOSE),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERSION)
                .help("Show version")
                .action(ArgAction::SetTrue)
                .short('V')
                .long(GLOBAL_ARG_VERSION),
        )
        .arg(
            Arg::new(GLOBAL_ARG_TEST_CONFIG)
                .help("Test the format of config file and exit")
                .action(ArgAction::SetTrue)
                .short('t')
                .long(GLOBAL_ARG_TEST_CONFIG),
        )
        .arg(
            Arg::new(GLOBAL_ARG_CONFIG_FILE)
                .help("Config file path")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .required_unless_present(GLOBAL_ARG_VERSION)
                .short('c')
                .long(GLOBAL_ARG_CONFIG_FILE),
        )
        .get_matches();

    if args.get_flag(GLOBAL_ARG_VERSION) {
        crate::build::print_version();
        return Ok(None);
    }

    let config_file = args
        .get_one::<PathBuf>(GLOBAL_ARG_CONFIG_FILE)
        .ok_or_else(|| anyhow!("no config file set"))?
        .clone();

    Ok(Some(ProcArgs {
        config_file,
        verbose_level: args.get_count(GLOBAL_ARG_VERBOSE),
        test_config: args.get_flag(GLOBAL_ARG_TEST_CONFIG),
    }))
}
