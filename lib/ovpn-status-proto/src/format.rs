/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

const TITLE_SINGLE: &str = "OpenVPN STATISTICS";
const TITLE_MULTI_V1: &str = "OpenVPN CLIENT LIST";
const TITLE_MULTI_V2_PREFIX: &str = "TITLE";

/// Status file variant, classified from the title line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFormat {
    /// Point-to-point or client instance, one peer, aggregate counters.
    Single,
    /// Multi-client list without line type tokens, comma delimited.
    /// Added in openvpn-2.0-beta3.
    MultiV1,
    /// Multi-client list with line type tokens and a HEADER row, comma
    /// (v2, openvpn-2.0-beta15) or tab (v3, openvpn-2.1_rc14) delimited.
    MultiV2,
}

impl StatusFormat {
    /// Classify a title line with the line terminator already stripped.
    pub fn detect(title: &str) -> Option<Self> {
        if title == TITLE_SINGLE {
            Some(StatusFormat::Single)
        } else if title == TITLE_MULTI_V1 {
            Some(StatusFormat::MultiV1)
        } else if title.starts_with(TITLE_MULTI_V2_PREFIX) {
            Some(StatusFormat::MultiV2)
        } else {
            None
        }
    }

    pub fn is_multi(&self) -> bool {
        !matches!(self, StatusFormat::Single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_known() {
        assert_eq!(
            StatusFormat::detect("OpenVPN STATISTICS"),
            Some(StatusFormat::Single)
        );
        assert_eq!(
            StatusFormat::detect("OpenVPN CLIENT LIST"),
            Some(StatusFormat::MultiV1)
        );
        assert_eq!(
            StatusFormat::detect("TITLE,OpenVPN 2.4.4 x86_64-pc-linux-gnu"),
            Some(StatusFormat::MultiV2)
        );
        assert_eq!(
            StatusFormat::detect("TITLE\tOpenVPN 2.4.4"),
            Some(StatusFormat::MultiV2)
        );
    }

    #[test]
    fn detect_unknown() {
        assert_eq!(StatusFormat::detect(""), None);
        assert_eq!(StatusFormat::detect("OpenVPN"), None);
        // title matches are exact, not prefix, for single and v1
        assert_eq!(StatusFormat::detect("OpenVPN STATISTICS extra"), None);
    }
}
