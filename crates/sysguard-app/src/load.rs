//! Rule document discovery and YAML parsing.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Number, Value};
use sysguard_domain::model::ProfileDocument;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Load every rule document under `paths`.
///
/// Directories are walked recursively in sorted order and contribute their `*.yaml` /
/// `*.yml` files; plain file paths are loaded as-is. Each document is tagged with its
/// profile name (see [`profile_name`]).
pub fn load_documents(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<ProfileDocument>> {
    let mut docs = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in yaml_files(path)? {
                docs.push(load_file(&file, profile_name(path, &file))?);
            }
        } else {
            let profile = path.file_stem().unwrap_or(path.as_str()).to_string();
            docs.push(load_file(path, profile)?);
        }
    }
    info!(documents = docs.len(), "loaded rule documents");
    Ok(docs)
}

/// Profile name of `file` found under `root`: the relative path without extension, with
/// directory separators turned into dots (`cis/centos-7.yaml` -> `cis.centos-7`).
pub fn profile_name(root: &Utf8Path, file: &Utf8Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let without_ext = rel.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse one YAML document into the generic mapping structure the engine consumes.
///
/// Non-string mapping keys are stringified; YAML tags are dropped.
pub fn parse_document(text: &str) -> anyhow::Result<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).context("parse yaml")?;
    Ok(yaml_to_json(yaml))
}

fn yaml_files(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };
        if matches!(path.extension(), Some("yaml" | "yml")) {
            out.push(path.to_path_buf());
        }
    }
    Ok(out)
}

fn load_file(path: &Utf8Path, profile: String) -> anyhow::Result<ProfileDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let document = parse_document(&text).with_context(|| format!("parse rule document {path}"))?;
    debug!(%path, %profile, "loaded rule document");
    Ok(ProfileDocument::new(profile, document))
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::new();
            for (k, v) in map {
                obj.insert(key_text(k), yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn key_text(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(s) => s,
        Value::Null => "~".to_string(),
        other => other.to_string(),
    }
}
