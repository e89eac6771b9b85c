/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use log::{debug, error, warn};
use ovpn_status_proto::{StatusFormat, StatusParseError, StatusReader};

use crate::config::collect::CollectConfig;
use crate::config::source::SourceConfig;
use crate::export::ArcExporter;

mod emit;
use emit::CycleEmitter;

/// Periodic reader for one configured status file.
///
/// Each cycle opens the file fresh and runs one full parse pass. The file
/// read is blocking and runs off the async runtime.
pub(crate) struct StatusSource {
    config: Arc<SourceConfig>,
    collect: &'static CollectConfig,
    exporter: ArcExporter,
}

impl StatusSource {
    pub(crate) fn new(
        config: Arc<SourceConfig>,
        collect: &'static CollectConfig,
        exporter: ArcExporter,
    ) -> Self {
        StatusSource {
            config,
            collect,
            exporter,
        }
    }

    fn read_cycle(&self) -> Result<StatusFormat, StatusParseError> {
        let file = File::open(self.config.path())?;
        let mut reader = StatusReader::new(BufReader::new(file));
        let mut emitter = CycleEmitter::new(self.config.name(), self.collect, self.exporter.as_ref());
        let format = reader.read_status(&mut emitter)?;
        emitter.finish(format);
        Ok(format)
    }

    fn log_cycle_error(&self, e: &StatusParseError) {
        let path = self.config.path();
        match e {
            StatusParseError::Io(_) => {
                warn!("failed to read status file {}: {e}", path.display());
            }
            StatusParseError::UnrecognizedFormat => {
                warn!(
                    "unknown status file format in {}, please report this \
                     as a bug and include your status file",
                    path.display()
                );
            }
            StatusParseError::FieldCountMismatch { .. } => {
                error!("file format error in {}: {e}", path.display());
            }
        }
    }

    pub(crate) async fn into_running(self) {
        let mut interval = tokio::time::interval(self.collect.interval);
        let source = Arc::new(self);
        loop {
            interval.tick().await;
            let s = source.clone();
            match tokio::task::spawn_blocking(move || {
                let r = s.read_cycle();
                if let Err(e) = &r {
                    s.log_cycle_error(e);
                }
                r
            })
            .await
            {
                Ok(Ok(format)) => {
                    debug!(
                        "read status file {} as {format:?}",
                        source.config.path().display()
                    );
                }
                Ok(Err(_)) => {} // already logged in the blocking task
                Err(e) => {
                    warn!(
                        "collect task for {} failed to join: {e}",
                        source.config.path().display()
                    );
                }
            }
        }
    }
}
