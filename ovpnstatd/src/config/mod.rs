/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader, yaml};

pub(crate) mod collect;
pub(crate) mod exporter;
pub(crate) mod source;

mod value;

/// Load the daemon configuration from a yaml file. Registries are reset
/// first so a failed load does not leave partial state behind.
pub fn load(config_file: &Path) -> anyhow::Result<()> {
    source::clear();

    let mut collect_config = collect::CollectConfig::default();
    foreach_doc(config_file, |i, doc| {
        load_doc(doc, &mut collect_config)
            .map_err(|e| anyhow!("failed to load config doc #{i}: {e}"))
    })?;
    collect_config.check()?;
    collect::store(collect_config);
    Ok(())
}

fn load_doc(doc: &Yaml, collect_config: &mut collect::CollectConfig) -> anyhow::Result<()> {
    match doc {
        Yaml::Hash(map) => foreach_kv(map, |k, v| {
            let normalized = normalize_key(k);
            match normalized.as_str() {
                "source" | "status_file" => source::load_all(v),
                "exporter" => exporter::load(v),
                _ => collect_config.set(normalized.as_str(), v),
            }
        }),
        _ => Err(anyhow!("yaml doc root should be a map")),
    }
}

fn foreach_doc<F>(path: &Path, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(usize, &Yaml) -> anyhow::Result<()>,
{
    let contents = std::fs::read_to_string(path)
        .context(format!("failed to read config file {}", path.display()))?;
    let docs = YamlLoader::load_from_str(&contents)
        .context(format!("invalid yaml in config file {}", path.display()))?;
    for (i, doc) in docs.iter().enumerate() {
        f(i, doc)?;
    }
    Ok(())
}

pub(crate) fn foreach_kv<F>(map: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in map.iter() {
        if let Yaml::String(key) = k {
            f(key, v)?;
        } else {
            return Err(anyhow!("all keys in the yaml map should be strings"));
        }
    }
    Ok(())
}

pub(crate) fn normalize_key(k: &str) -> String {
    k.to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn key_normalization() {
        assert_eq!(normalize_key("Collect-Compression"), "collect_compression");
        assert_eq!(normalize_key("interval"), "interval");
    }

    // the registries behind load() are process-wide, keep every load()
    // call in this one test so runs cannot interleave
    #[test]
    fn load_configs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source:\n\
             \x20 - /run/openvpn/server-a.status\n\
             \x20 - path: /run/openvpn/server-b.status\n\
             improved-naming-schema: on\n\
             collect_user_count: true\n\
             interval: 5s\n\
             exporter: memory\n"
        )
        .unwrap();

        load(file.path()).unwrap();

        let sources = source::get_all();
        assert_eq!(sources.len(), 2);
        let config = collect::get();
        assert!(config.improved_naming_schema);
        assert!(config.user_count);
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(exporter::get(), exporter::ExporterKind::Memory);

        source::clear();

        // unknown top level keys are rejected
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "no_such_key: 1").unwrap();
        assert!(load(file.path()).is_err());

        // missing config file
        assert!(load(Path::new("/nonexistent/ovpnstatd.yaml")).is_err());
    }
}
