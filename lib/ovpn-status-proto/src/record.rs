/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

/// One connected peer from a multi-client status list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientRecord<'a> {
    pub common_name: &'a str,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// Cumulative counters accumulated over a single-endpoint status file.
///
/// `tun_tx` holds "TUN/TAP read bytes" (read from the system, sent over the
/// tunnel) and `tun_rx` holds "TUN/TAP write bytes" (read from the tunnel,
/// written to the system).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    pub link_rx: u64,
    pub link_tx: u64,
    pub tun_rx: u64,
    pub tun_tx: u64,
    pub pre_compress: u64,
    pub post_compress: u64,
    pub pre_decompress: u64,
    pub post_decompress: u64,
}

impl AggregateCounters {
    /// Tunnel overhead in (rx, tx) order.
    ///
    /// The grouping is fixed: the compression compensation must be applied
    /// before the tunnel payload is subtracted, and intermediates rely on
    /// u64 wraparound cancelling out. Do not reorder.
    pub fn overhead(&self) -> (u64, u64) {
        let rx = self
            .link_rx
            .wrapping_sub(self.pre_decompress)
            .wrapping_add(self.post_decompress)
            .wrapping_sub(self.tun_rx);
        let tx = self
            .link_tx
            .wrapping_sub(self.post_compress)
            .wrapping_add(self.pre_compress)
            .wrapping_sub(self.tun_tx);
        (rx, tx)
    }
}

/// Receiver for the derived records of one parse pass.
///
/// Multi-client parsers call [`visit_client`] once per valid data row, in
/// file order, as rows are read; rows delivered before a mid-stream failure
/// are not retracted. The single-endpoint parser calls [`visit_totals`]
/// exactly once, at end of file.
///
/// [`visit_client`]: StatusVisitor::visit_client
/// [`visit_totals`]: StatusVisitor::visit_totals
pub trait StatusVisitor {
    fn visit_client(&mut self, client: ClientRecord<'_>);
    fn visit_totals(&mut self, totals: &AggregateCounters);
}
