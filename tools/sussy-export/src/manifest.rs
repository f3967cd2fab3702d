//! sussy.toml batch manifest
//!
//! ```toml
//! [output]
//! dir = "build"
//!
//! [[meshes]]
//! id = "crate"
//! path = "models/crate.obj"
//! output = "crate.sussy"   # optional, defaults to "<id>.sussy"
//! ```
//!
//! Relative paths resolve against the manifest's directory.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::mesh::convert_mesh;
use crate::registry::Registry;

/// sussy.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct MeshManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,

    /// Directory the manifest was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Output configuration section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output directory (default: manifest directory)
    pub dir: Option<String>,
}

/// Single mesh entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    pub id: String,
    pub path: String,
    /// Output file name inside the output directory
    #[serde(default)]
    pub output: Option<String>,
}

impl MeshManifest {
    /// Parse manifest from string; relative paths resolve against `base_dir`
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let mut manifest: Self = toml::from_str(content).context("Failed to parse sussy.toml")?;
        manifest.base_dir = base_dir.to_path_buf();
        Ok(manifest)
    }

    /// Resolved output directory, with an optional override
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match (override_dir, &self.output.dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => self.base_dir.join(dir),
            (None, None) => self.base_dir.clone(),
        }
    }

    pub fn source_path(&self, entry: &MeshEntry) -> PathBuf {
        self.base_dir.join(&entry.path)
    }

    pub fn output_path(&self, entry: &MeshEntry, output_dir: &Path) -> PathBuf {
        match &entry.output {
            Some(name) => output_dir.join(name),
            None => output_dir.join(format!("{}.{}", entry.id, sussy_format::SUSSY_EXT)),
        }
    }
}

/// Load manifest from file
pub fn load_manifest(path: &Path) -> Result<MeshManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    MeshManifest::parse(&content, base_dir)
}

/// Check ids, source formats and source files without building
pub fn validate(manifest: &MeshManifest, registry: &Registry) -> Result<()> {
    if manifest.meshes.is_empty() {
        bail!("Manifest declares no meshes");
    }

    let mut seen = hashbrown::HashSet::new();
    for entry in &manifest.meshes {
        if entry.id.trim().is_empty() {
            bail!("Mesh entry with path {:?} has an empty id", entry.path);
        }
        if !seen.insert(entry.id.as_str()) {
            bail!("Duplicate mesh id: {}", entry.id);
        }

        let source = manifest.source_path(entry);
        registry
            .exporter_for(&source)
            .with_context(|| format!("Mesh '{}'", entry.id))?;
        if !source.is_file() {
            bail!("Mesh '{}': source not found: {}", entry.id, source.display());
        }
    }

    Ok(())
}

/// Validate, then convert every mesh; returns the written paths
pub fn build_all(
    manifest: &MeshManifest,
    registry: &Registry,
    output_override: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    validate(manifest, registry)?;

    let output_dir = manifest.output_dir(output_override);
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let mut written = Vec::with_capacity(manifest.meshes.len());
    for entry in &manifest.meshes {
        let input = manifest.source_path(entry);
        let output = manifest.output_path(entry, &output_dir);
        tracing::info!("[{}] {:?} -> {:?}", entry.id, input, output);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        convert_mesh(registry, &input, &output)
            .with_context(|| format!("Failed to build mesh '{}'", entry.id))?;
        written.push(output);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[output]
dir = "build"

[[meshes]]
id = "crate"
path = "models/crate.obj"

[[meshes]]
id = "barrel"
path = "models/barrel.glb"
output = "props/barrel.sussy"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = MeshManifest::parse(MANIFEST, Path::new("project")).unwrap();
        assert_eq!(manifest.meshes.len(), 2);
        assert_eq!(manifest.output.dir.as_deref(), Some("build"));

        let out = manifest.output_dir(None);
        assert_eq!(out, Path::new("project/build"));
        assert_eq!(
            manifest.output_path(&manifest.meshes[0], &out),
            Path::new("project/build/crate.sussy")
        );
        assert_eq!(
            manifest.output_path(&manifest.meshes[1], &out),
            Path::new("project/build/props/barrel.sussy")
        );
        assert_eq!(
            manifest.source_path(&manifest.meshes[1]),
            Path::new("project/models/barrel.glb")
        );
        assert_eq!(manifest.output_dir(Some(Path::new("/tmp/x"))), Path::new("/tmp/x"));
    }

    #[test]
    fn test_defaults() {
        let manifest = MeshManifest::parse("", Path::new(".")).unwrap();
        assert!(manifest.meshes.is_empty());
        assert!(manifest.output.dir.is_none());
        assert!(validate(&manifest, &Registry::new()).is_err());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.obj"), "").unwrap();
        let manifest = MeshManifest::parse(
            "[[meshes]]\nid = \"a\"\npath = \"a.obj\"\n\n[[meshes]]\nid = \"a\"\npath = \"a.obj\"\n",
            dir.path(),
        )
        .unwrap();

        let err = validate(&manifest, &Registry::new()).unwrap_err();
        assert!(err.to_string().contains("Duplicate mesh id"));
    }

    #[test]
    fn test_validate_source_checks() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new();

        let missing =
            MeshManifest::parse("[[meshes]]\nid = \"m\"\npath = \"m.obj\"\n", dir.path()).unwrap();
        assert!(validate(&missing, &registry)
            .unwrap_err()
            .to_string()
            .contains("source not found"));

        let unsupported =
            MeshManifest::parse("[[meshes]]\nid = \"m\"\npath = \"m.fbx\"\n", dir.path()).unwrap();
        assert!(validate(&unsupported, &registry).is_err());
    }

    #[test]
    fn test_build_all_nested_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        let manifest = MeshManifest::parse(
            "[output]\ndir = \"out\"\n\n[[meshes]]\nid = \"tri\"\npath = \"tri.obj\"\noutput = \"sub/deeper/tri.sussy\"\n",
            dir.path(),
        )
        .unwrap();

        let written = build_all(&manifest, &Registry::new(), None).unwrap();
        let expected = dir.path().join("out/sub/deeper/tri.sussy");
        assert_eq!(written, vec![expected.clone()]);
        assert_eq!(
            std::fs::read(&expected).unwrap().len(),
            sussy_format::encoded_size(3, 1, 1)
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(MeshManifest::parse("[[meshes]]\nid = 3\n", Path::new(".")).is_err());
    }
}
