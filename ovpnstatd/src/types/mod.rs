/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};

mod instance;
pub(crate) use instance::Instance;

/// Plugin tag carried by every emitted sample.
pub(crate) const PLUGIN_NAME: &str = "openvpn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MetricKind {
    /// Point-in-time connected user count.
    Users,
    /// Paired rx/tx cumulative byte counters (traffic and overhead).
    IfOctets,
    /// Paired uncompressed/compressed cumulative byte counters.
    Compression,
}

impl MetricKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Users => "users",
            MetricKind::IfOctets => "if_octets",
            MetricKind::Compression => "compression",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MetricValue {
    /// Two monotonically increasing 64-bit counters, rx then tx.
    Counters(u64, u64),
    Gauge(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counters(rx, tx) => {
                f.write_str(itoa::Buffer::new().format(*rx))?;
                f.write_char(':')?;
                f.write_str(itoa::Buffer::new().format(*tx))
            }
            MetricValue::Gauge(v) => f.write_str(ryu::Buffer::new().format(*v)),
        }
    }
}

/// One typed metric sample handed to the exporter.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MetricRecord {
    pub(crate) kind: MetricKind,
    /// Identifies the vpn status source, or the client in the legacy
    /// naming schema.
    pub(crate) outer: Option<Instance>,
    /// Sub resource within the source: the per-source tag ("traffic",
    /// "overhead", ...) or the client in the improved naming schema.
    pub(crate) inner: Option<Instance>,
    pub(crate) value: MetricValue,
}

impl MetricRecord {
    pub(crate) fn display_identifier(&self) -> DisplayIdentifier<'_> {
        DisplayIdentifier(self)
    }
}

pub(crate) struct DisplayIdentifier<'a>(&'a MetricRecord);

impl fmt::Display for DisplayIdentifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PLUGIN_NAME)?;
        if let Some(outer) = &self.0.outer {
            f.write_char('-')?;
            f.write_str(outer.as_str())?;
        }
        f.write_char('/')?;
        f.write_str(self.0.kind.as_str())?;
        if let Some(inner) = &self.0.inner {
            f.write_char('-')?;
            f.write_str(inner.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier() {
        let record = MetricRecord {
            kind: MetricKind::IfOctets,
            outer: Some(Instance::new("vpn0.status")),
            inner: Some(Instance::new("traffic")),
            value: MetricValue::Counters(1, 2),
        };
        assert_eq!(
            record.display_identifier().to_string(),
            "openvpn-vpn0.status/if_octets-traffic"
        );
        assert_eq!(record.value.to_string(), "1:2");

        let record = MetricRecord {
            kind: MetricKind::IfOctets,
            outer: Some(Instance::new("clientA")),
            inner: None,
            value: MetricValue::Counters(500, 700),
        };
        assert_eq!(
            record.display_identifier().to_string(),
            "openvpn-clientA/if_octets"
        );
    }

    #[test]
    fn gauge_value() {
        let value = MetricValue::Gauge(3.0);
        assert_eq!(value.to_string(), "3.0");
    }
}
