//! Ingestion of external color-transformation datasets.
//!
//! A dataset is a JSON object holding a cube size plus four equal-length
//! sequences: red, green and blue channel values and the color of each
//! sample. External producers name these fields in several conventions
//! (`cubesize`, `redValues`, `input_colors`, ...); [`normalize_field_name`]
//! maps them onto [`DatasetField`] before anything else looks at the data.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ColorCubeError, Result};
use crate::lattice::{ColorSample, Lattice, DEFAULT_CUBE_SIZE};

/// Internal name of a dataset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetField {
    /// Side length of the lattice.
    CubeSize,
    /// Red channel values.
    Red,
    /// Green channel values.
    Green,
    /// Blue channel values.
    Blue,
    /// Per-sample colors.
    Colors,
}

impl DatasetField {
    /// All fields, in the order they are validated.
    pub const ALL: [DatasetField; 5] = [
        DatasetField::CubeSize,
        DatasetField::Red,
        DatasetField::Green,
        DatasetField::Blue,
        DatasetField::Colors,
    ];

    /// Internal key used after normalization.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DatasetField::CubeSize => "cube_size",
            DatasetField::Red => "red",
            DatasetField::Green => "green",
            DatasetField::Blue => "blue",
            DatasetField::Colors => "colors",
        }
    }
}

/// Maps an external field name onto its internal field.
///
/// Matching ignores ASCII case, `_` and `-`, so `redValues`, `red_values`
/// and `RED-VALUES` are the same name. Returns `None` for names that are not
/// part of the dataset format.
#[must_use]
pub fn normalize_field_name(name: &str) -> Option<DatasetField> {
    let folded: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match folded.as_str() {
        "cubesize" | "size" => Some(DatasetField::CubeSize),
        "red" | "r" | "redvalues" | "reds" => Some(DatasetField::Red),
        "green" | "g" | "greenvalues" | "greens" => Some(DatasetField::Green),
        "blue" | "b" | "bluevalues" | "blues" => Some(DatasetField::Blue),
        "colors" | "colours" | "inputcolors" | "inputcolours" => Some(DatasetField::Colors),
        _ => None,
    }
}

/// Rewrites the keys of a dataset object into internal names.
///
/// Unknown keys are dropped. Two external keys that normalize to the same
/// field are rejected, since there is no way to tell which one is meant.
pub fn normalize_fields(object: Map<String, Value>) -> Result<Map<String, Value>> {
    let mut normalized = Map::with_capacity(object.len());
    for (name, value) in object {
        let Some(field) = normalize_field_name(&name) else {
            log::debug!("ignoring unknown dataset field '{name}'");
            continue;
        };
        if normalized.insert(field.key().to_string(), value).is_some() {
            return Err(ColorCubeError::MalformedDataset(format!(
                "field '{name}' duplicates '{}'",
                field.key()
            )));
        }
    }
    Ok(normalized)
}

/// A color triple as written in a dataset.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ColorTriple {
    Array([f32; 3]),
    Object { r: f32, g: f32, b: f32 },
}

impl From<ColorTriple> for ColorSample {
    fn from(triple: ColorTriple) -> Self {
        match triple {
            ColorTriple::Array([r, g, b]) | ColorTriple::Object { r, g, b } => {
                ColorSample::new(r, g, b)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    cube_size: i64,
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
    colors: Vec<ColorTriple>,
}

/// A fully received, field-normalized dataset.
///
/// Shape is not validated until [`Dataset::into_lattice`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Declared side length of the lattice.
    pub cube_size: i64,
    /// Red channel values.
    pub red: Vec<f32>,
    /// Green channel values.
    pub green: Vec<f32>,
    /// Blue channel values.
    pub blue: Vec<f32>,
    /// Per-sample colors.
    pub colors: Vec<ColorSample>,
}

impl Dataset {
    /// Parses a dataset from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Reads a reader to the end, then parses it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Loads a dataset file.
    ///
    /// The whole file is read before parsing starts.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("loaded dataset {} ({} bytes)", path.display(), json.len());
        Self::from_json_str(&json)
    }

    /// Builds a dataset from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(ColorCubeError::MalformedDataset(
                "dataset must be a JSON object".to_string(),
            ));
        };
        let normalized = normalize_fields(object)?;

        for field in DatasetField::ALL {
            if !normalized.contains_key(field.key()) {
                return Err(ColorCubeError::MalformedDataset(format!(
                    "missing field '{}'",
                    field.key()
                )));
            }
        }

        let raw: RawDataset = serde_json::from_value(Value::Object(normalized))?;
        Ok(Self {
            cube_size: raw.cube_size,
            red: raw.red,
            green: raw.green,
            blue: raw.blue,
            colors: raw.colors.into_iter().map(ColorSample::from).collect(),
        })
    }

    /// Validates the dataset shape and converts it into a lattice.
    pub fn into_lattice(self) -> Result<Lattice> {
        let cube_size = u32::try_from(self.cube_size)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(ColorCubeError::InvalidCubeSize(self.cube_size))?;
        Lattice::from_channels(cube_size, self.red, self.green, self.blue, self.colors)
    }
}

/// Where a lattice comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeSource {
    /// The analytic identity cube.
    Identity {
        /// Side length of the cube.
        cube_size: u32,
    },
    /// A dataset file.
    Dataset(PathBuf),
}

impl Default for LatticeSource {
    fn default() -> Self {
        LatticeSource::Identity {
            cube_size: DEFAULT_CUBE_SIZE,
        }
    }
}

impl LatticeSource {
    /// Produces the lattice.
    pub fn load(&self) -> Result<Lattice> {
        let lattice = match self {
            LatticeSource::Identity { cube_size } => Lattice::identity(*cube_size)?,
            LatticeSource::Dataset(path) => Dataset::from_path(path)?.into_lattice()?,
        };
        log::info!(
            "lattice ready: cube size {}, {} samples",
            lattice.cube_size(),
            lattice.len()
        );
        Ok(lattice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn identity_json(n: u32) -> Value {
        let lattice = Lattice::identity(n).unwrap();
        json!({
            "cubesize": n,
            "redValues": lattice.red(),
            "greenValues": lattice.green(),
            "blueValues": lattice.blue(),
            "inputColors": lattice
                .colors()
                .iter()
                .map(|c| json!({ "r": c.r, "g": c.g, "b": c.b }))
                .collect::<Vec<_>>(),
        })
    }

    #[test]
    fn test_normalize_aliases() {
        let cases = [
            ("cubesize", DatasetField::CubeSize),
            ("cubeSize", DatasetField::CubeSize),
            ("cube_size", DatasetField::CubeSize),
            ("size", DatasetField::CubeSize),
            ("red", DatasetField::Red),
            ("r", DatasetField::Red),
            ("redValues", DatasetField::Red),
            ("red_values", DatasetField::Red),
            ("green", DatasetField::Green),
            ("greenValues", DatasetField::Green),
            ("blue", DatasetField::Blue),
            ("BLUE-VALUES", DatasetField::Blue),
            ("colors", DatasetField::Colors),
            ("inputColors", DatasetField::Colors),
            ("input_colours", DatasetField::Colors),
        ];
        for (name, field) in cases {
            assert_eq!(normalize_field_name(name), Some(field), "alias '{name}'");
        }
        assert_eq!(normalize_field_name("alpha"), None);
        assert_eq!(normalize_field_name(""), None);
    }

    #[test]
    fn test_normalize_is_idempotent_on_internal_keys() {
        for field in DatasetField::ALL {
            assert_eq!(normalize_field_name(field.key()), Some(field));
        }
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Dataset::from_value(json!({
            "cubesize": 1,
            "red": [0.0],
            "redValues": [0.0],
            "green": [0.0],
            "blue": [0.0],
            "colors": [[0.0, 0.0, 0.0]],
        }))
        .unwrap_err();
        assert!(matches!(err, ColorCubeError::MalformedDataset(_)));
    }

    #[test]
    fn test_load_identity_dataset() {
        let dataset = Dataset::from_value(identity_json(3)).unwrap();
        let lattice = dataset.into_lattice().unwrap();
        assert_eq!(lattice, Lattice::identity(3).unwrap());
    }

    #[test]
    fn test_array_colors() {
        let json = r#"{
            "cube_size": 1,
            "r": [0.25], "g": [0.5], "b": [0.75],
            "colors": [[1.0, 0.0, 0.5]],
            "comment": "ignored"
        }"#;
        let lattice = Dataset::from_json_str(json).unwrap().into_lattice().unwrap();
        assert_eq!(lattice.position(0).unwrap(), glam::Vec3::new(0.25, 0.5, 0.75));
        assert_eq!(lattice.color(0).unwrap(), ColorSample::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_short_channel_is_malformed() {
        let mut value = identity_json(4);
        value["greenValues"] = json!(vec![0.0_f32; 60]);
        let err = Dataset::from_value(value).unwrap().into_lattice().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLattice);
        assert!(matches!(
            err,
            ColorCubeError::MalformedLattice {
                field: "green",
                expected: 64,
                actual: 60
            }
        ));
    }

    #[test]
    fn test_missing_field() {
        let err = Dataset::from_value(json!({ "cubesize": 1, "red": [0.0] })).unwrap_err();
        assert!(matches!(err, ColorCubeError::MalformedDataset(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Dataset::from_json_str("[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLattice);
    }

    #[test]
    fn test_non_positive_cube_size() {
        let err = Dataset::from_value(json!({
            "cubesize": 0, "red": [], "green": [], "blue": [], "colors": []
        }))
        .unwrap()
        .into_lattice()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = Dataset::from_value(json!({
            "cubesize": -2, "red": [], "green": [], "blue": [], "colors": []
        }))
        .unwrap()
        .into_lattice()
        .unwrap_err();
        assert!(matches!(err, ColorCubeError::InvalidCubeSize(-2)));
    }

    #[test]
    fn test_from_reader() {
        let json = identity_json(2).to_string();
        let dataset = Dataset::from_reader(json.as_bytes()).unwrap();
        assert_eq!(dataset.cube_size, 2);
        assert_eq!(dataset.colors.len(), 8);
    }

    #[test]
    fn test_source_default_is_identity() {
        let lattice = LatticeSource::default().load().unwrap();
        assert_eq!(lattice.cube_size(), DEFAULT_CUBE_SIZE);
    }

    #[test]
    fn test_source_missing_file() {
        let source = LatticeSource::Dataset(PathBuf::from("/nonexistent/colorcube.json"));
        assert_eq!(source.load().unwrap_err().kind(), ErrorKind::Io);
    }
}
