/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::StatusParseError;
use crate::fields::{parse_counter, split_fields};
use crate::record::{ClientRecord, StatusVisitor};

// OpenVPN-2.4 writes 11 data fields plus the leading line type token.
// Leave room for future extensions.
const MAX_FIELDS: usize = 20;

const ROW_HEADER: &str = "HEADER";
const ROW_CLIENT: &str = "CLIENT_LIST";

const COL_COMMON_NAME: &str = "Common Name";
const COL_BYTES_RECV: &str = "Bytes Received";
const COL_BYTES_SENT: &str = "Bytes Sent";

/// Column positions resolved from the CLIENT_LIST header row. Data rows
/// carry a CLIENT_LIST token where the header carries HEADER and are one
/// field shorter, so each target index is the header field index minus one.
/// Zero means unresolved, as no column can map there.
#[derive(Default)]
struct ColumnMap {
    common_name: usize,
    bytes_recv: usize,
    bytes_sent: usize,
}

/// Parser for the headered multi-client v2/v3 list.
///
/// v2 and v3 only differ in delimiter (comma vs tab), which the tokenizer
/// already folds together. The field set varies across openvpn versions, so
/// column positions come from the HEADER row instead of being fixed.
#[derive(Default)]
pub(super) struct MultiV2Parser {
    found_header: bool,
    map: ColumnMap,
    columns: usize,
}

impl MultiV2Parser {
    /// Returns `Ok(true)` once the data section ended and remaining lines
    /// are to be skipped.
    pub(super) fn feed_line<V: StatusVisitor>(
        &mut self,
        line: &str,
        visitor: &mut V,
    ) -> Result<bool, StatusParseError> {
        let fields = split_fields(line, MAX_FIELDS);

        if !self.found_header {
            if fields.len() < 2 || fields[0] != ROW_HEADER || fields[1] != ROW_CLIENT {
                return Ok(false);
            }

            for (i, field) in fields.iter().enumerate().skip(2) {
                match *field {
                    COL_COMMON_NAME => self.map.common_name = i - 1,
                    COL_BYTES_RECV => self.map.bytes_recv = i - 1,
                    COL_BYTES_SENT => self.map.bytes_sent = i - 1,
                    _ => {}
                }
            }

            if self.map.common_name == 0 || self.map.bytes_recv == 0 || self.map.bytes_sent == 0 {
                return Err(StatusParseError::UnrecognizedFormat);
            }

            self.columns = fields.len() - 1;
            self.found_header = true;
            return Ok(false);
        }

        // any non CLIENT_LIST row ends the section, including the END
        // footer; an empty section is fine
        if fields.is_empty() || fields[0] != ROW_CLIENT {
            return Ok(true);
        }

        if fields.len() != self.columns {
            return Err(StatusParseError::FieldCountMismatch {
                expected: self.columns,
                found: fields.len(),
            });
        }

        visitor.visit_client(ClientRecord {
            common_name: fields[self.map.common_name],
            bytes_recv: parse_counter(fields[self.map.bytes_recv]),
            bytes_sent: parse_counter(fields[self.map.bytes_sent]),
        });
        Ok(false)
    }

    pub(super) fn finish(self) -> Result<(), StatusParseError> {
        if self.found_header {
            Ok(())
        } else {
            Err(StatusParseError::UnrecognizedFormat)
        }
    }
}
