//! Format registration
//!
//! The host side owns a registry of file handlers; [`register`] is the one
//! startup call that installs the Sussy exporters and importers into it.

use anyhow::{bail, Result};
use hashbrown::HashMap;
use std::path::Path;

use sussy_format::SussyMesh;

use crate::mesh::{self, LoadedMesh};
use crate::obj_sink;

/// Loads a host mesh file so it can be exported to `.sussy`
pub type SourceLoader = fn(&Path) -> Result<LoadedMesh>;
/// Writes a decoded `.sussy` mesh out as a host mesh file
pub type SinkWriter = fn(&SussyMesh, &Path) -> Result<()>;

/// Registry capability provided by the host
pub trait FormatRegistry {
    /// Register a source format that can be exported to `.sussy`
    fn register_exporter(&mut self, ext: &str, label: &'static str, loader: SourceLoader);

    /// Register a target format that `.sussy` files can be imported into
    fn register_importer(&mut self, ext: &str, label: &'static str, writer: SinkWriter);
}

/// Install all Sussy handlers
pub fn register<R: FormatRegistry + ?Sized>(registry: &mut R) {
    registry.register_exporter("obj", "Wavefront OBJ", mesh::load_obj);
    registry.register_exporter("gltf", "glTF 2.0", mesh::load_gltf);
    registry.register_exporter("glb", "glTF 2.0 binary", mesh::load_gltf);
    registry.register_importer("obj", "Wavefront OBJ", obj_sink::write_obj_file);
}

#[derive(Debug, Clone, Copy)]
struct Handler<F> {
    label: &'static str,
    func: F,
}

/// Extension-keyed registry used by the CLI
#[derive(Debug, Default)]
pub struct Registry {
    exporters: HashMap<String, Handler<SourceLoader>>,
    importers: HashMap<String, Handler<SinkWriter>>,
}

impl Registry {
    /// Registry with the Sussy handlers installed
    pub fn new() -> Self {
        let mut registry = Self::default();
        register(&mut registry);
        registry
    }

    /// Loader for an input file, chosen by extension
    pub fn exporter_for(&self, path: &Path) -> Result<SourceLoader> {
        match self.exporters.get(&extension(path)) {
            Some(handler) => Ok(handler.func),
            None => bail!(
                "Unsupported mesh format: {:?} (use {})",
                path,
                list_extensions(&self.exporters)
            ),
        }
    }

    /// Writer for an output file, chosen by extension
    pub fn importer_for(&self, path: &Path) -> Result<SinkWriter> {
        match self.importers.get(&extension(path)) {
            Some(handler) => Ok(handler.func),
            None => bail!(
                "Unsupported output format: {:?} (use {})",
                path,
                list_extensions(&self.importers)
            ),
        }
    }

    pub fn supports_export(&self, path: &Path) -> bool {
        self.exporters.contains_key(&extension(path))
    }

    /// Registered source formats as (extension, label), sorted by extension
    pub fn exporters(&self) -> Vec<(&str, &'static str)> {
        let mut list: Vec<_> = self
            .exporters
            .iter()
            .map(|(ext, h)| (ext.as_str(), h.label))
            .collect();
        list.sort_unstable();
        list
    }
}

impl FormatRegistry for Registry {
    fn register_exporter(&mut self, ext: &str, label: &'static str, loader: SourceLoader) {
        self.exporters.insert(
            ext.to_lowercase(),
            Handler {
                label,
                func: loader,
            },
        );
    }

    fn register_importer(&mut self, ext: &str, label: &'static str, writer: SinkWriter) {
        self.importers.insert(
            ext.to_lowercase(),
            Handler {
                label,
                func: writer,
            },
        );
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn list_extensions<F>(handlers: &HashMap<String, Handler<F>>) -> String {
    let mut exts: Vec<String> = handlers.keys().map(|e| format!(".{}", e)).collect();
    exts.sort_unstable();
    exts.join(", ")
}
