//! TOML configuration for the controller.
//!
//! Every section is optional; a missing section falls back to the stock tables.
//!
//! ```toml
//! [inference]
//! and_op = "min"
//! or_op = "max"
//!
//! [distance]
//! close = [0.0, 0.0, 30.0]
//! intermediate = [20.0, 40.0, 60.0]
//! long = [50.0, 100.0, 100.0]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::inference::MamdaniInference;
use crate::membership::TermRange;
use crate::ops::{AndOp, OrOp};
use crate::terms::{LinguisticTerm, Terms};
use crate::variable::{Variables, DISTANCE_RANGES, PRESSURE_RANGES, SPEED_RANGES};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
}

/// Term name to `[start, peak, end]`
pub type RangeTable = BTreeMap<String, TermRange>;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub inference: InferenceConfig,
    pub distance: RangeTable,
    pub speed: RangeTable,
    pub brake_pressure: RangeTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            distance: table(DISTANCE_RANGES),
            speed: table(SPEED_RANGES),
            brake_pressure: table(PRESSURE_RANGES),
        }
    }
}

fn table<K: LinguisticTerm>(ranges: [(K, TermRange); 3]) -> RangeTable {
    ranges.into_iter().map(|(term, range)| (term.name().to_owned(), range)).collect()
}

fn terms<K: LinguisticTerm>(table: &RangeTable) -> Result<Terms<K>> {
    table
        .iter()
        .map(|(name, range)| {
            K::from_name(name)
                .map(|term| (term, *range))
                .ok_or_else(|| Error::invalid_configuration(K::VARIABLE, name.as_str(), "unknown term"))
        })
        .collect::<Result<Vec<_>>>()
        .map(|entries| entries.into_iter().collect())
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig { path: path.to_owned(), source })?;
        let config = Self::from_toml_str(&content)?;

        tracing::info!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Validates the range tables
    pub fn variables(&self) -> Result<Variables> {
        Variables::new(&terms(&self.distance)?, &terms(&self.speed)?, &terms(&self.brake_pressure)?)
    }

    pub fn inference(&self) -> MamdaniInference {
        MamdaniInference::new(self.inference.and_op, self.inference.or_op)
    }
}

#[test]
fn test_empty_config_is_reference() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.inference, InferenceConfig { and_op: AndOp::Min, or_op: OrOp::Max });
    assert!(config.variables().is_ok());
}

#[test]
fn test_partial_override() {
    use crate::terms::Speed;

    let config = Config::from_toml_str(
        r#"
        [inference]
        and_op = "prod"

        [speed]
        slow = [0.0, 0.0, 50.0]
        medium = [40.0, 80.0, 120.0]
        fast = [110.0, 160.0, 160.0]
        "#,
    )
    .unwrap();

    assert_eq!(config.inference.and_op, AndOp::Prod);
    assert_eq!(config.inference.or_op, OrOp::Max);
    assert_eq!(config.distance, table(DISTANCE_RANGES));

    let vars = config.variables().unwrap();

    assert_eq!(vars.speed.range(Speed::Fast), &TermRange::new(110., 160., 160.));
}

#[test]
fn test_invalid_tables() {
    let unordered = Config::from_toml_str(
        r#"
        [brake_pressure]
        soft = [0.0, 0.0, 40.0]
        medium = [30.0, 80.0, 70.0]
        hard = [60.0, 100.0, 100.0]
        "#,
    )
    .unwrap();

    assert!(matches!(
        unordered.variables(),
        Err(Error::InvalidConfiguration { variable: "brake_pressure", .. })
    ));

    let unknown = Config::from_toml_str(
        r#"
        [distance]
        close = [0.0, 0.0, 30.0]
        near = [20.0, 40.0, 60.0]
        long = [50.0, 100.0, 100.0]
        "#,
    )
    .unwrap();

    assert!(matches!(unknown.variables(), Err(Error::InvalidConfiguration { ref term, .. }) if term == "near"));

    let missing = Config::from_toml_str("[distance]\nclose = [0.0, 0.0, 30.0]\n").unwrap();

    assert!(matches!(missing.variables(), Err(Error::InvalidConfiguration { .. })));
}

#[test]
fn test_malformed_toml() {
    assert!(matches!(Config::from_toml_str("[distance]\nclose = [0.0, 30.0]\n"), Err(Error::ParseConfig(_))));
    assert!(matches!(Config::from_toml_str("[gearbox]\n"), Err(Error::ParseConfig(_))));
    assert!(matches!(Config::from_toml_str("[inference]\nand_op = \"xor\"\n"), Err(Error::ParseConfig(_))));
}

#[test]
fn test_load_missing_file() {
    let err = Config::load("/nonexistent/fuzzy-brake.toml").unwrap_err();

    assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn test_touching_terms_leave_a_dead_point() {
    use crate::inputs::Inputs;
    use crate::rules::Rules;

    // CLOSE ends exactly where INTERMEDIATE starts, so at 20 both are defined but zero
    let config = Config::from_toml_str(
        r#"
        [distance]
        close = [0.0, 0.0, 20.0]
        intermediate = [20.0, 40.0, 60.0]
        long = [50.0, 100.0, 100.0]
        "#,
    )
    .unwrap();
    let vars = config.variables().unwrap();
    let model = config.inference();

    let err = model.eval(&vars, &Rules::default(), &Inputs::new(20., 50.).unwrap()).unwrap_err();

    assert!(matches!(err, Error::NoApplicableRule));
    assert!(model.eval(&vars, &Rules::default(), &Inputs::new(21., 50.).unwrap()).is_ok());
}
