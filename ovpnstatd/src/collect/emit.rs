/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use ovpn_status_proto::{AggregateCounters, ClientRecord, StatusFormat, StatusVisitor};

use crate::config::collect::CollectConfig;
use crate::export::Exporter;
use crate::types::{Instance, MetricKind, MetricRecord, MetricValue};

/// Turns the records of one parse pass into metric samples.
///
/// Samples go out as rows are visited, so a pass that fails midway still
/// leaves the rows seen so far exported. The user count is held back until
/// [`finish`], as it is only meaningful after a complete pass.
///
/// [`finish`]: CycleEmitter::finish
pub(super) struct CycleEmitter<'a> {
    name: &'a Instance,
    config: &'a CollectConfig,
    exporter: &'a dyn Exporter,
    users: u64,
}

impl<'a> CycleEmitter<'a> {
    pub(super) fn new(
        name: &'a Instance,
        config: &'a CollectConfig,
        exporter: &'a dyn Exporter,
    ) -> Self {
        CycleEmitter {
            name,
            config,
            exporter,
            users: 0,
        }
    }

    fn emit_tagged(&self, kind: MetricKind, tag: &str, value: MetricValue) {
        self.exporter.add_metric(&MetricRecord {
            kind,
            outer: Some(self.name.clone()),
            inner: Some(Instance::new(tag)),
            value,
        });
    }

    pub(super) fn finish(self, format: StatusFormat) {
        if self.config.user_count && format.is_multi() {
            // zero is a valid reading, an empty client list still reports
            self.exporter.add_metric(&MetricRecord {
                kind: MetricKind::Users,
                outer: Some(self.name.clone()),
                inner: Some(self.name.clone()),
                value: MetricValue::Gauge(self.users as f64),
            });
        }
    }
}

impl StatusVisitor for CycleEmitter<'_> {
    fn visit_client(&mut self, client: ClientRecord<'_>) {
        self.users += 1;
        if !self.config.individual_users {
            return;
        }

        let value = MetricValue::Counters(client.bytes_recv, client.bytes_sent);
        let record = if self.config.improved_naming_schema {
            MetricRecord {
                kind: MetricKind::IfOctets,
                outer: Some(self.name.clone()),
                inner: Some(Instance::new(client.common_name)),
                value,
            }
        } else {
            // legacy schema: the client name is the only instance, which
            // collides across status files tracking the same client
            MetricRecord {
                kind: MetricKind::IfOctets,
                outer: Some(Instance::new(client.common_name)),
                inner: None,
                value,
            }
        };
        self.exporter.add_metric(&record);
    }

    fn visit_totals(&mut self, totals: &AggregateCounters) {
        self.emit_tagged(
            MetricKind::IfOctets,
            "traffic",
            MetricValue::Counters(totals.link_rx, totals.link_tx),
        );
        let (overhead_rx, overhead_tx) = totals.overhead();
        self.emit_tagged(
            MetricKind::IfOctets,
            "overhead",
            MetricValue::Counters(overhead_rx, overhead_tx),
        );

        if self.config.compression {
            // uncompressed bytes first, compressed second
            self.emit_tagged(
                MetricKind::Compression,
                "data_in",
                MetricValue::Counters(totals.post_decompress, totals.pre_decompress),
            );
            self.emit_tagged(
                MetricKind::Compression,
                "data_out",
                MetricValue::Counters(totals.pre_compress, totals.post_compress),
            );
        }
    }
}
