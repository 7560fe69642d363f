//! Test Configuration
//!
//! Defines the configuration of a chi-square test run and the JSON
//! persistence helpers shared by configurations and results.
use crate::constants::DEFAULT_SIGNIFICANCE_LEVEL;
use crate::errors::ChiSquareError;
use crate::utils::{items_to_strings, validate_significance_level};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How to treat tables for which the statistic is not defined.
///
/// A table is degenerate when its grand total is zero, when a full
/// row or column is zero, or when it has a single row or column.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DegeneracyPolicy {
    /// Return a result, with the affected fields set to NaN or infinity.
    #[default]
    Permissive,
    /// Fail with [`ChiSquareError::DegenerateTable`].
    Strict,
}

impl FromStr for DegeneracyPolicy {
    type Err = ChiSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Permissive" => Ok(DegeneracyPolicy::Permissive),
            "Strict" => Ok(DegeneracyPolicy::Strict),
            _ => Err(ChiSquareError::ParseString(
                s.to_string(),
                "DegeneracyPolicy".to_string(),
                items_to_strings(vec!["Permissive", "Strict"]),
            )),
        }
    }
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

/// Configuration for an `IndependenceTest`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Significance level, the upper-tail probability of the critical value.
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    /// Treatment of degenerate tables.
    #[serde(default)]
    pub degeneracy_policy: DegeneracyPolicy,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            degeneracy_policy: DegeneracyPolicy::Permissive,
        }
    }
}

impl TestConfig {
    /// Check the configuration before a run.
    pub fn validate(&self) -> Result<(), ChiSquareError> {
        validate_significance_level(self.significance_level)
    }
}

/// JSON doesn't carry NaN or infinity, serde_json writes them as `null`.
pub(crate) fn parse_nan<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(d).map(|x: Option<_>| x.unwrap_or(f64::NAN))
}

pub(crate) fn parse_nan_vec<'de, D>(d: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(d).map(|x: Vec<Option<f64>>| x.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

pub(crate) fn parse_nan_grid<'de, D>(d: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(d).map(|x: Vec<Vec<Option<f64>>>| {
        x.into_iter()
            .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect()
    })
}

/// IO
pub trait JsonIO: Serialize + DeserializeOwned + Sized {
    /// Save the object as json to a file.
    ///
    /// * `path` - Path to save to.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChiSquareError> {
        fs::write(path, self.json_dump()?).map_err(|e| ChiSquareError::UnableToWrite(e.to_string()))
    }

    /// Dump the object as a json string.
    fn json_dump(&self) -> Result<String, ChiSquareError> {
        serde_json::to_string(self).map_err(|e| ChiSquareError::UnableToWrite(e.to_string()))
    }

    /// Load the object from a json string.
    ///
    /// * `json_str` - String object, which can be deserialized from json.
    fn from_json(json_str: &str) -> Result<Self, ChiSquareError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ChiSquareError::UnableToRead(e.to_string()))
    }

    /// Load the object from a path to a json file.
    ///
    /// * `path` - Path to load from.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChiSquareError> {
        let json_str = fs::read_to_string(path).map_err(|e| ChiSquareError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl JsonIO for TestConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = TestConfig::default();
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.degeneracy_policy, DegeneracyPolicy::Permissive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config = TestConfig::from_json("{}").unwrap();
        assert_eq!(config, TestConfig::default());

        let config = TestConfig::from_json(r#"{"degeneracy_policy": "Strict"}"#).unwrap();
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.degeneracy_policy, DegeneracyPolicy::Strict);
    }

    #[test]
    fn test_config_validate() {
        let config = TestConfig {
            significance_level: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChiSquareError::InvalidSignificanceLevel(_))
        ));
    }

    #[test]
    fn test_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let config = TestConfig {
            significance_level: 0.01,
            degeneracy_policy: DegeneracyPolicy::Strict,
        };
        config.save(&file_path).unwrap();
        let config2 = TestConfig::load(&file_path).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_config_io_errors() {
        assert!(matches!(
            TestConfig::from_json("not json"),
            Err(ChiSquareError::UnableToRead(_))
        ));
        let dir = tempdir().unwrap();
        assert!(matches!(
            TestConfig::load(dir.path().join("missing.json")),
            Err(ChiSquareError::UnableToRead(_))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Strict".parse::<DegeneracyPolicy>().unwrap(), DegeneracyPolicy::Strict);
        assert_eq!(
            "Permissive".parse::<DegeneracyPolicy>().unwrap(),
            DegeneracyPolicy::Permissive
        );
        assert!(matches!(
            "Lenient".parse::<DegeneracyPolicy>(),
            Err(ChiSquareError::ParseString(..))
        ));
    }

    #[test]
    fn test_parse_nan() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(deserialize_with = "parse_nan")]
            val: f64,
            #[serde(deserialize_with = "parse_nan_vec")]
            vals: Vec<f64>,
            #[serde(deserialize_with = "parse_nan_grid")]
            grid: Vec<Vec<f64>>,
        }
        let json = r#"{"val": null, "vals": [1.0, null], "grid": [[null], [2.0]]}"#;
        let s: TestStruct = serde_json::from_str(json).unwrap();
        assert!(s.val.is_nan());
        assert_eq!(s.vals[0], 1.0);
        assert!(s.vals[1].is_nan());
        assert!(s.grid[0][0].is_nan());
        assert_eq!(s.grid[1][0], 2.0);
    }
}
