//! Shape registry backed by a directory of shape files
//!
//! - Shapes are stored at `<shape_dir>/shape_<name>.json`
//! - One file per shape
//! - Registered shapes are immutable
//! - Malformed files fail the whole load (FATAL)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::field::Field;
use crate::observability::Event;

use super::definition::Definition;
use super::errors::{ShapeError, ShapeResult};
use super::result::ValidationResult;
use super::types::ShapeFile;
use super::validator::Validator;

/// Named definitions loaded from disk or registered in code.
pub struct ShapeRegistry {
    /// Directory containing shape files
    shape_dir: PathBuf,
    /// Definitions indexed by shape name
    shapes: BTreeMap<String, Definition>,
}

impl ShapeRegistry {
    /// Creates an empty registry reading from `shape_dir`.
    pub fn new(shape_dir: impl Into<PathBuf>) -> Self {
        Self {
            shape_dir: shape_dir.into(),
            shapes: BTreeMap::new(),
        }
    }

    /// Returns the shape directory path.
    pub fn shape_dir(&self) -> &Path {
        &self.shape_dir
    }

    /// Loads every `*.json` file of the shape directory.
    ///
    /// A missing directory is created and yields no shapes.
    pub fn load_all(&mut self) -> ShapeResult<()> {
        if !self.shape_dir.exists() {
            fs::create_dir_all(&self.shape_dir).map_err(|e| {
                ShapeError::malformed_shape(
                    self.shape_dir.display().to_string(),
                    format!("Failed to create shape directory: {}", e),
                )
            })?;
            return Ok(());
        }

        let entries = fs::read_dir(&self.shape_dir).map_err(|e| {
            ShapeError::malformed_shape(
                self.shape_dir.display().to_string(),
                format!("Failed to read shape directory: {}", e),
            )
        })?;

        // Sorted so duplicate-name failures are reported deterministically.
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ShapeError::malformed_shape(
                    self.shape_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_shape_file(path)?;
        }

        tracing::info!(
            event = %Event::ShapesLoaded,
            dir = %self.shape_dir.display(),
            count = self.shapes.len(),
            "shape directory loaded"
        );

        Ok(())
    }

    /// Loads a single shape file.
    pub fn load_shape_file(&mut self, path: &Path) -> ShapeResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            ShapeError::malformed_shape(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let file: ShapeFile = serde_json::from_str(&content).map_err(|e| {
            ShapeError::malformed_shape(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        let definition = file.to_definition()?;
        self.register(file.name, definition)
    }

    /// Registers a definition under `name`.
    pub fn register(&mut self, name: impl Into<String>, definition: Definition) -> ShapeResult<()> {
        let name = name.into();

        if self.shapes.contains_key(&name) {
            return Err(ShapeError::shape_immutable(name));
        }

        tracing::debug!(
            event = %Event::ShapeRegistered,
            shape = %name,
            optional = definition.optional_count(),
            "shape registered"
        );

        self.shapes.insert(name, definition);
        Ok(())
    }

    /// Gets a definition by name.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.shapes.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Validates a candidate against the named shape.
    pub fn validate(&self, name: &str, candidate: &Field) -> ShapeResult<ValidationResult> {
        let definition = self.get(name).ok_or_else(|| ShapeError::unknown_shape(name))?;
        Ok(Validator::new(definition).validate(candidate))
    }

    /// Returns whether a candidate is compatible with the named shape.
    pub fn is_compatible(&self, name: &str, candidate: &Field) -> ShapeResult<bool> {
        let definition = self.get(name).ok_or_else(|| ShapeError::unknown_shape(name))?;
        Ok(Validator::new(definition).is_compatible(candidate))
    }

    /// Writes a shape file for `definition` into the shape directory.
    pub fn save_shape(&self, name: &str, definition: &Definition) -> ShapeResult<PathBuf> {
        let file = ShapeFile::from_definition(name, definition);
        file.validate_structure()
            .map_err(|e| ShapeError::malformed_shape(name, e))?;

        let path = self.shape_dir.join(format!("shape_{}.json", name));

        if path.exists() {
            return Err(ShapeError::shape_immutable(name));
        }

        if !self.shape_dir.exists() {
            fs::create_dir_all(&self.shape_dir).map_err(|e| {
                ShapeError::malformed_shape(
                    self.shape_dir.display().to_string(),
                    format!("Failed to create shape directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&file).map_err(|e| {
            ShapeError::malformed_shape(path.display().to_string(), format!("Failed to serialize shape: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            ShapeError::malformed_shape(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}
