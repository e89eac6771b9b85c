/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::fields::{parse_counter, split_fields};
use crate::record::{AggregateCounters, StatusVisitor};

const MAX_FIELDS: usize = 4;

/// Accumulator for the single-endpoint statistics file.
///
/// The file is a flat list of `key,value` lines written by openvpn's
/// sig.c:print_status(). Only lines that tokenize to exactly 2 fields are
/// inspected; everything else is header or footer noise.
#[derive(Default)]
pub(super) struct SingleParser {
    totals: AggregateCounters,
}

impl SingleParser {
    pub(super) fn feed_line(&mut self, line: &str) {
        let fields = split_fields(line, MAX_FIELDS);
        if fields.len() != 2 {
            return;
        }

        let value = parse_counter(fields[1]);
        match fields[0] {
            // read from the system and sent over the tunnel
            "TUN/TAP read bytes" => self.totals.tun_tx = value,
            // read from the tunnel and written to the system
            "TUN/TAP write bytes" => self.totals.tun_rx = value,
            "TCP/UDP read bytes" => self.totals.link_rx = value,
            "TCP/UDP write bytes" => self.totals.link_tx = value,
            "pre-compress bytes" => self.totals.pre_compress = value,
            "post-compress bytes" => self.totals.post_compress = value,
            "pre-decompress bytes" => self.totals.pre_decompress = value,
            "post-decompress bytes" => self.totals.post_decompress = value,
            _ => {}
        }
    }

    pub(super) fn finish<V: StatusVisitor>(self, visitor: &mut V) {
        visitor.visit_totals(&self.totals);
    }
}
