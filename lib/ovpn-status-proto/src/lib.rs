/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

//! Parsing of OpenVPN status files.
//!
//! The status file comes in three mutually incompatible variants: the
//! single endpoint statistics file, the headerless multi-client v1 list,
//! and the headered multi-client v2/v3 list (comma or tab delimited).
//! [`StatusReader`] detects the variant from the title line and drives
//! the matching parser, delivering derived records to a [`StatusVisitor`].

mod error;
pub use error::StatusParseError;

mod fields;
pub use fields::split_fields;

mod format;
pub use format::StatusFormat;

mod record;
pub use record::{AggregateCounters, ClientRecord, StatusVisitor};

mod parse;
pub use parse::StatusReader;
