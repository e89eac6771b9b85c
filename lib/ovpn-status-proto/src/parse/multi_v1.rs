/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::StatusParseError;
use crate::fields::{parse_counter, split_fields};
use crate::record::{ClientRecord, StatusVisitor};

const MAX_FIELDS: usize = 10;

const V1_HEADER: &str = "Common Name,Real Address,Bytes Received,Bytes Sent,Connected Since";
const SECTION_END: &str = "ROUTING TABLE";

/// Parser for the headerless multi-client v1 list.
///
/// The client list starts after the fixed legacy column header line and
/// ends at the "ROUTING TABLE" marker; the column positions are fixed.
/// Header and end marker are matched on the raw line, before tokenizing.
#[derive(Default)]
pub(super) struct MultiV1Parser {
    found_header: bool,
}

impl MultiV1Parser {
    /// Returns true once the data section ended and remaining lines are to
    /// be skipped.
    pub(super) fn feed_line<V: StatusVisitor>(&mut self, line: &str, visitor: &mut V) -> bool {
        if line == SECTION_END {
            return true;
        }
        if line == V1_HEADER {
            self.found_header = true;
            return false;
        }
        if !self.found_header {
            return false;
        }

        let fields = split_fields(line, MAX_FIELDS);
        if fields.len() < 4 {
            return false;
        }

        visitor.visit_client(ClientRecord {
            common_name: fields[0],
            bytes_recv: parse_counter(fields[2]),
            bytes_sent: parse_counter(fields[3]),
        });
        false
    }

    pub(super) fn finish(self) -> Result<(), StatusParseError> {
        if self.found_header {
            Ok(())
        } else {
            Err(StatusParseError::UnrecognizedFormat)
        }
    }
}
