//! File helpers for the `pn-gen` binary: loading nets and configs, writing run artefacts.
use std::fs::File;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::time::SystemTime;

use anyhow::{
    Context,
    Result,
};
use chrono::{
    DateTime,
    Utc,
};
use pn_core::{
    AcceptingNet,
    NetDefinition,
};
use serde_json::json;
use tracing::{
    debug,
    instrument,
};

use crate::playout::PlayoutConfig;

/// Load a net definition serialized as YAML (`.yaml`/`.yml`), JSON, or `MessagePack`.
///
/// Files with any other extension are tried as JSON first and `MessagePack` second.
#[instrument]
pub fn load_net(path: &Path) -> Result<AcceptingNet> {
    let bytes = std::fs::read(path).with_context(|| format!("reading net from {}", path.display()))?;

    let definition: NetDefinition = match extension(path).as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_slice(&bytes)?,
        Some("msgpack" | "mp") => rmp_serde::from_slice(&bytes)?,
        _ => serde_json::from_slice(&bytes).or_else(|_| rmp_serde::from_slice(&bytes))?,
    };

    Ok(AcceptingNet::try_from(definition)?)
}

/// Load a [`PlayoutConfig`] from a YAML or JSON file; missing options take their defaults.
#[instrument]
pub fn load_config(path: &Path) -> Result<PlayoutConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading config from {}", path.display()))?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Create a timestamped output directory under `runs/` and write basic metadata.
#[instrument]
pub fn create_timestamped_output_dir() -> Result<PathBuf> {
    let base_dir = PathBuf::from("runs");
    std::fs::create_dir_all(&base_dir)?;

    let now: DateTime<Utc> = SystemTime::now().into();
    let timestamp = now.to_rfc3339().replace([':', '.'], "-"); // make filesystem-friendly
    let output_dir = base_dir.join(timestamp);
    std::fs::create_dir_all(&output_dir)?;

    let metadata = json!({
        "timestamp": now.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "command_args": std::env::args().collect::<Vec<_>>()
    });
    write_json(&output_dir.join("metadata.json"), &metadata)?;

    Ok(output_dir)
}

/// Pretty-print `value` as JSON into `path`.
#[instrument(skip(value))]
pub fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&file, value)?;
    Ok(())
}

/// Write DOT graph description to a file within `output_dir` and return the path.
#[instrument(skip(dot_content))]
pub fn write_dot_file(output_dir: &Path, filename: &str, dot_content: &str) -> Result<PathBuf> {
    let file_path = output_dir.join(filename);
    let mut file = File::create(&file_path)?;
    write!(file, "{dot_content}")?;

    debug!("Net written to: {}", file_path.display());
    Ok(file_path)
}

/// Lower-cased file extension, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase)
}
