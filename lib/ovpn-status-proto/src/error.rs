/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusParseError {
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    #[error("unrecognized status file format")]
    UnrecognizedFormat,
    #[error("column count mismatch: row has {found} fields, header declared {expected}")]
    FieldCountMismatch { expected: usize, found: usize },
}

impl StatusParseError {
    pub fn is_unrecognized_format(&self) -> bool {
        matches!(self, StatusParseError::UnrecognizedFormat)
    }
}
