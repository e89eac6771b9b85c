/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::Context;
use log::{info, warn};

pub mod build;
pub mod config;
pub mod opts;

mod collect;
mod export;
mod types;

use collect::StatusSource;

pub async fn run() -> anyhow::Result<()> {
    let collect_config = config::collect::get();
    let exporter = export::spawn(config::exporter::get());

    let sources = config::source::get_all();
    if sources.is_empty() {
        warn!("no status file configured, nothing will be collected");
    }
    for source_config in sources {
        let source = StatusSource::new(source_config, collect_config, exporter.clone());
        tokio::spawn(source.into_running());
    }

    wait_for_quit_signal().await
}

#[cfg(unix)]
async fn wait_for_quit_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt =
        signal(SignalKind::interrupt()).context("failed to setup SIGINT handler")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("failed to setup SIGTERM handler")?;

    tokio::select! {
        _ = interrupt.recv() => info!("got SIGINT, quit"),
        _ = terminate.recv() => info!("got SIGTERM, quit"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_quit_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for CTRL-C")?;
    info!("got CTRL-C, quit");
    Ok(())
}
