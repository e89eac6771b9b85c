/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::Exporter;
use crate::types::MetricRecord;

/// Prints one line per sample, identifier first.
#[derive(Default)]
pub(crate) struct ConsoleExporter {}

impl Exporter for ConsoleExporter {
    fn add_metric(&self, record: &MetricRecord) {
        println!("{} {}", record.display_identifier(), record.value);
    }
}
