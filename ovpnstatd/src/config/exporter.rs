/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Mutex;

use anyhow::anyhow;
use yaml_rust::Yaml;

use super::value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ExporterKind {
    #[default]
    Console,
    Discard,
    Memory,
}

static EXPORTER_KIND: Mutex<ExporterKind> = Mutex::new(ExporterKind::Console);

pub(super) fn load(v: &Yaml) -> anyhow::Result<()> {
    let s = value::as_string(v)?;
    let kind = match super::normalize_key(&s).as_str() {
        "console" | "stdout" => ExporterKind::Console,
        "discard" => ExporterKind::Discard,
        "memory" => ExporterKind::Memory,
        _ => return Err(anyhow!("unsupported exporter type {s}")),
    };
    *EXPORTER_KIND.lock().unwrap() = kind;
    Ok(())
}

pub(crate) fn get() -> ExporterKind {
    *EXPORTER_KIND.lock().unwrap()
}
