/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use foldhash::fast::FixedState;
use yaml_rust::Yaml;

use crate::types::Instance;

/// One tracked status file. The short name is the file basename and keys
/// the registry; emitted samples carry it as the source instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceConfig {
    name: Instance,
    path: PathBuf,
}

impl SourceConfig {
    pub(crate) fn parse(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::String(path) => Self::with_path(PathBuf::from(path)),
            Yaml::Hash(map) => {
                let mut path = None;
                super::foreach_kv(map, |k, v| match super::normalize_key(k).as_str() {
                    "path" | "status_file" => {
                        path = Some(PathBuf::from(super::value::as_string(v)?));
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;
                let path = path.ok_or_else(|| anyhow!("no status file path set"))?;
                Self::with_path(path)
            }
            _ => Err(anyhow!("yaml value for a status source should be a path or a map")),
        }
    }

    fn with_path(path: PathBuf) -> anyhow::Result<Self> {
        let name = path
            .file_name()
            .and_then(|v| v.to_str())
            .ok_or_else(|| {
                anyhow!("no valid file name in status file path {}", path.display())
            })?;
        Ok(SourceConfig {
            name: Instance::new(name),
            path,
        })
    }

    #[inline]
    pub(crate) fn name(&self) -> &Instance {
        &self.name
    }

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

static SOURCE_REGISTRY: Mutex<HashMap<Instance, Arc<SourceConfig>, FixedState>> =
    Mutex::new(HashMap::with_hasher(FixedState::with_seed(0)));

pub(super) fn load_all(v: &Yaml) -> anyhow::Result<()> {
    match v {
        Yaml::Array(seq) => {
            for (i, entry) in seq.iter().enumerate() {
                let source = SourceConfig::parse(entry)
                    .map_err(|e| anyhow!("invalid status source #{i}: {e}"))?;
                add(source)?;
            }
            Ok(())
        }
        _ => add(SourceConfig::parse(v)?),
    }
}

fn add(source: SourceConfig) -> anyhow::Result<()> {
    let mut ht = SOURCE_REGISTRY.lock().unwrap();
    add_to(&mut ht, source)
}

fn add_to(
    ht: &mut HashMap<Instance, Arc<SourceConfig>, FixedState>,
    source: SourceConfig,
) -> anyhow::Result<()> {
    let name = source.name.clone();
    if ht.contains_key(&name) {
        return Err(anyhow!(
            "status file name {name} is already used, please choose a different one"
        ));
    }
    ht.insert(name, Arc::new(source));
    Ok(())
}

pub(crate) fn get_all() -> Vec<Arc<SourceConfig>> {
    let ht = SOURCE_REGISTRY.lock().unwrap();
    ht.values().cloned().collect()
}

pub(super) fn clear() {
    let mut ht = SOURCE_REGISTRY.lock().unwrap();
    ht.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_basename() {
        let source =
            SourceConfig::parse(&Yaml::String("/run/openvpn/vpn0.status".to_string())).unwrap();
        assert_eq!(source.name().as_str(), "vpn0.status");
        assert_eq!(source.path(), Path::new("/run/openvpn/vpn0.status"));
    }

    #[test]
    fn map_form() {
        let mut map = yaml_rust::yaml::Hash::new();
        map.insert(
            Yaml::String("path".to_string()),
            Yaml::String("/etc/openvpn/client.status".to_string()),
        );
        let source = SourceConfig::parse(&Yaml::Hash(map)).unwrap();
        assert_eq!(source.name().as_str(), "client.status");
    }

    #[test]
    fn invalid_path() {
        assert!(SourceConfig::parse(&Yaml::String("/run/openvpn/..".to_string())).is_err());
        assert!(SourceConfig::parse(&Yaml::Integer(3)).is_err());
    }

    #[test]
    fn duplicate_basename_rejected() {
        let first =
            SourceConfig::parse(&Yaml::String("/run/a/dup-test.status".to_string())).unwrap();
        let second =
            SourceConfig::parse(&Yaml::String("/run/b/dup-test.status".to_string())).unwrap();
        let mut ht = HashMap::with_hasher(FixedState::with_seed(0));
        add_to(&mut ht, first).unwrap();
        assert!(add_to(&mut ht, second).is_err());
    }
}
