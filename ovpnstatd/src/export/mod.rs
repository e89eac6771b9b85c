/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use crate::config::exporter::ExporterKind;
use crate::types::MetricRecord;

mod console;
pub(crate) use console::ConsoleExporter;

mod discard;
pub(crate) use discard::DiscardExporter;

mod memory;
pub(crate) use memory::MemoryExporter;

/// Receiver for emitted metric samples. Serialization and transport are
/// the exporter's business; the collect side only hands over records.
pub(crate) trait Exporter {
    fn add_metric(&self, record: &MetricRecord);
}

pub(crate) type ArcExporter = Arc<dyn Exporter + Send + Sync>;

pub(crate) fn spawn(kind: ExporterKind) -> ArcExporter {
    match kind {
        ExporterKind::Console => Arc::new(ConsoleExporter::default()),
        ExporterKind::Discard => Arc::new(DiscardExporter::default()),
        ExporterKind::Memory => Arc::new(MemoryExporter::default()),
    }
}
