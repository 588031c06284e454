//! Serde data file structs for container definitions.
//!
//! Quantities are plain `f64` on disk and converted into the tag's units by
//! the loader after validation.

use serde::Deserialize;

/// A container definition in a data file.
///
/// RON form: `(name: "main_tank", capacity: 255.0, fill: Some(0.0))`.
/// TOML files list these under a top-level `[[containers]]` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContainerData {
    pub name: String,
    pub capacity: f64,
    /// Starting fill. Containers without one start full.
    #[serde(default)]
    pub fill: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_fill_is_optional() {
        let data: Vec<ContainerData> =
            ron::from_str(r#"[(name: "a", capacity: 10.0), (name: "b", capacity: 5.0, fill: Some(1.5))]"#)
                .unwrap();
        assert_eq!(data[0].fill, None);
        assert_eq!(data[1].fill, Some(1.5));
    }

    #[test]
    fn json_accepts_null_fill() {
        let data: ContainerData =
            serde_json::from_str(r#"{"name": "tank", "capacity": 3.0, "fill": null}"#).unwrap();
        assert_eq!(data.name, "tank");
        assert_eq!(data.fill, None);
    }
}
