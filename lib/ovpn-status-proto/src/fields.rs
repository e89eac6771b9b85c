/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use atoi::FromRadix10;
use memchr::memchr2;

/// Split a status line into fields on `,` and `\t`.
///
/// Empty tokens produced by adjacent delimiters are discarded. At most
/// `max_fields` fields are returned; any text after the last kept field is
/// silently dropped. A blank line yields an empty vec.
pub fn split_fields(line: &str, max_fields: usize) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut offset = 0;

    while fields.len() < max_fields {
        match memchr2(b',', b'\t', &bytes[offset..]) {
            Some(0) => offset += 1,
            Some(p) => {
                fields.push(&line[offset..offset + p]);
                offset += p + 1;
            }
            None => {
                if offset < bytes.len() {
                    fields.push(&line[offset..]);
                }
                break;
            }
        }
    }

    fields
}

/// Parse a byte counter field the way C `atoll` does: take the leading
/// decimal digits after optional whitespace, yield 0 if there are none.
pub(crate) fn parse_counter(s: &str) -> u64 {
    let (value, _digits) = u64::from_radix_10(s.trim_start().as_bytes());
    value
}
