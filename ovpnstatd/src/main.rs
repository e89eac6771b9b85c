/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::Context;
use log::{LevelFilter, error, info};

fn main() -> anyhow::Result<()> {
    let Some(proc_args) =
        ovpnstatd::opts::parse_clap().context("failed to parse command line options")?
    else {
        return Ok(());
    };

    setup_log(proc_args.verbose_level);

    ovpnstatd::config::load(&proc_args.config_file).context(format!(
        "failed to load config file {}",
        proc_args.config_file.display()
    ))?;

    if proc_args.test_config {
        info!("the format of the config file is ok");
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let ret = rt.block_on(ovpnstatd::run());
    if let Err(e) = &ret {
        error!("{e:?}");
    }
    ret
}

fn setup_log(verbose_level: u8) {
    let level = match verbose_level {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
