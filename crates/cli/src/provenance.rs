use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub seed: Option<u64>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Write the sidecar of an artifact that already exists on disk.
///
/// The seed plus params are enough to regenerate the artifact byte for byte.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "feeder_version": feeder::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "seed": payload.seed,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

/// `lines.geojson` -> `lines.provenance.json`, next to the artifact.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact.file_stem().unwrap_or(OsStr::new("artifact"));
    artifact.with_file_name(format!("{}.provenance.json", stem.to_string_lossy()))
}

/// `FEEDER_GIT_REV` when set, else `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    if let Some(rev) = std::env::var("FEEDER_GIT_REV").ok().filter(|r| !r.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        assert_eq!(
            provenance_path(Path::new("out/feeder_lines.geojson")),
            Path::new("out/feeder_lines.provenance.json")
        );
        assert_eq!(
            provenance_path(Path::new("feeders")),
            Path::new("feeders.provenance.json")
        );
    }

    #[test]
    fn git_rev_prefers_the_override() {
        std::env::set_var("FEEDER_GIT_REV", "abc123");
        assert_eq!(current_git_rev(), "abc123");
        std::env::remove_var("FEEDER_GIT_REV");
        assert!(!current_git_rev().is_empty());
    }

    #[test]
    fn write_sidecar_records_seed_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("lines.geojson");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new(json!({"lines_per_polygon": 5})).with_seed(2025);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["seed"], 2025);
        assert_eq!(parsed["params"]["lines_per_polygon"], 5);
    }
}
