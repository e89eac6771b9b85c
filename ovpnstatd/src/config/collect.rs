/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::anyhow;
use log::warn;
use yaml_rust::Yaml;

use super::value;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Collection behavior toggles, set once at configuration time and
/// read-only while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CollectConfig {
    pub(crate) compression: bool,
    pub(crate) improved_naming_schema: bool,
    pub(crate) user_count: bool,
    pub(crate) individual_users: bool,
    pub(crate) interval: Duration,
}

impl Default for CollectConfig {
    fn default() -> Self {
        CollectConfig {
            compression: true,
            improved_naming_schema: false,
            user_count: false,
            individual_users: true,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl CollectConfig {
    pub(super) fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match k {
            "collect_compression" => {
                self.compression = value::as_bool(v)?;
                Ok(())
            }
            "compression" => {
                warn!("config key compression is deprecated, use collect_compression instead");
                self.compression = value::as_bool(v)?;
                Ok(())
            }
            "improved_naming_schema" => {
                self.improved_naming_schema = value::as_bool(v)?;
                Ok(())
            }
            "collect_user_count" => {
                self.user_count = value::as_bool(v)?;
                Ok(())
            }
            "collect_individual_users" => {
                self.individual_users = value::as_bool(v)?;
                Ok(())
            }
            "interval" => {
                self.interval = value::as_duration(v)?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }

    pub(super) fn check(&self) -> anyhow::Result<()> {
        if !self.individual_users && !self.compression && !self.user_count {
            return Err(anyhow!(
                "neither collect_individual_users, collect_compression, \
                 nor collect_user_count is enabled, there is no data left to collect"
            ));
        }
        Ok(())
    }
}

static COLLECT_CONFIG: OnceLock<CollectConfig> = OnceLock::new();

pub(super) fn store(config: CollectConfig) {
    let _ = COLLECT_CONFIG.set(config);
}

pub(crate) fn get() -> &'static CollectConfig {
    COLLECT_CONFIG.get_or_init(CollectConfig::default)
}
