//! Loading pipeline: reads data files, validates definitions, builds tables.
//!
//! Provides format detection (RON/JSON/TOML) and deserialization helpers
//! used by [`load_containers`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use flow_core::container::{Container, Properties, State};
use flow_core::units::{ResourceTag, Units, UnitsOf};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::schema::ContainerData;
use crate::table::ContainerTable;

/// Key holding the container list in TOML files.
pub const TOML_CONTAINERS_KEY: &str = "containers";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A capacity was negative, not finite, or out of range for the units.
    #[error("container '{name}' in {file} has invalid capacity {capacity}")]
    InvalidCapacity {
        file: PathBuf,
        name: String,
        capacity: f64,
    },

    /// A starting fill was negative, not finite, or above capacity.
    #[error("container '{name}' in {file} has fill {fill} outside [0, {capacity}]")]
    InvalidFill {
        file: PathBuf,
        name: String,
        fill: f64,
        capacity: f64,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize a list from in-memory content. For TOML, extracts the array
/// at `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`. `source` only labels errors.
pub fn parse_list<T: DeserializeOwned>(
    content: &str,
    format: Format,
    toml_key: &str,
    source: &Path,
) -> Result<Vec<T>, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: source.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_err(format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_err(e.to_string()))
        }
    }
}

/// Read a file and deserialize a list from it according to its extension.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_list(&content, format, toml_key, path)
}

// ===========================================================================
// Table construction
// ===========================================================================

/// Validate definitions and build a table of containers for tag `T`.
///
/// Rejects negative or non-finite capacities, values the units of `T`
/// cannot represent, fills outside `[0, capacity]`, and repeated names.
/// Integer units truncate fractions. `source` only labels errors.
pub fn build_table<T: ResourceTag>(
    definitions: &[ContainerData],
    source: &Path,
) -> Result<ContainerTable<T>, DataLoadError> {
    let mut seen = HashSet::new();
    let mut table = ContainerTable::new();

    for def in definitions {
        if !seen.insert(def.name.as_str()) {
            return Err(DataLoadError::DuplicateName {
                file: source.to_path_buf(),
                name: def.name.clone(),
            });
        }

        let capacity = match <UnitsOf<T> as Units>::checked_from_f64(def.capacity) {
            Some(capacity) if def.capacity.is_finite() && def.capacity >= 0.0 => capacity,
            _ => {
                return Err(DataLoadError::InvalidCapacity {
                    file: source.to_path_buf(),
                    name: def.name.clone(),
                    capacity: def.capacity,
                });
            }
        };
        let mut container = Container::new(Properties::<T>::new(capacity));

        if let Some(fill) = def.fill {
            let converted = <UnitsOf<T> as Units>::checked_from_f64(fill)
                .filter(|_| fill.is_finite() && fill >= 0.0 && fill <= def.capacity)
                .ok_or_else(|| DataLoadError::InvalidFill {
                    file: source.to_path_buf(),
                    name: def.name.clone(),
                    fill,
                    capacity: def.capacity,
                })?;
            // Narrow unit types can round past capacity; clamp after conversion.
            let fill = converted.min_units(capacity);
            container.load_state(&State::new(fill));
        }

        table.insert(def.name.clone(), container);
    }

    Ok(table)
}

/// Load container definitions from a RON, TOML, or JSON file.
pub fn load_containers<T: ResourceTag>(path: &Path) -> Result<ContainerTable<T>, DataLoadError> {
    let definitions: Vec<ContainerData> = deserialize_list(path, TOML_CONTAINERS_KEY)?;
    let table = build_table::<T>(&definitions, path)?;
    debug!(
        resource = T::NAME,
        file = %path.display(),
        count = table.len(),
        "loaded container definitions"
    );
    Ok(table)
}

// ===========================================================================
// Tests
// ===========================================================================
