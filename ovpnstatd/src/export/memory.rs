/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Mutex;

use super::Exporter;
use crate::types::MetricRecord;

/// Keeps samples in memory, mainly useful for inspection and tests.
#[derive(Default)]
pub(crate) struct MemoryExporter {
    records: Mutex<Vec<MetricRecord>>,
}

impl MemoryExporter {
    pub(crate) fn records(&self) -> Vec<MetricRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Exporter for MemoryExporter {
    fn add_metric(&self, record: &MetricRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
