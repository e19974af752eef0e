use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::habitat::{Habitat, SeasonalTemperatures};
use crate::simulator::Simulator;
use crate::species::Species;

fn default_seed() -> u64 {
    7
}

/// A full simulation scenario as read from YAML: the horizon, the trial
/// count and the species/habitat rosters to cross.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub years: u32,
    pub iterations: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub species: Vec<SpeciesConfig>,
    pub habitats: Vec<HabitatConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesConfig {
    pub name: String,
    pub attributes: SpeciesAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesAttributes {
    pub monthly_food_consumption: u32,
    pub monthly_water_consumption: u32,
    pub life_span: u32,
    pub minimum_breeding_age: u32,
    pub maximum_breeding_age: u32,
    pub gestation_period: u32,
    pub minimum_temperature: i32,
    pub maximum_temperature: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HabitatConfig {
    pub name: String,
    pub monthly_food: u32,
    pub monthly_water: u32,
    pub average_temperature: SeasonalTemperatures,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario validation error: {0}")]
    Validation(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Scenario::from_yaml(&data).with_context(|| format!("Failed to load {}", path.display()))
    }
}

impl Scenario {
    /// Parse and validate a scenario from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(text).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.years == 0 {
            return Err(ScenarioError::Validation(
                "years must be at least 1".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(ScenarioError::Validation(
                "iterations must be at least 1".into(),
            ));
        }
        if self.species.is_empty() {
            return Err(ScenarioError::Validation(
                "scenario must define at least one species".into(),
            ));
        }
        if self.habitats.is_empty() {
            return Err(ScenarioError::Validation(
                "scenario must define at least one habitat".into(),
            ));
        }

        let mut species_names = HashSet::new();
        for species in &self.species {
            if !species_names.insert(species.name.as_str()) {
                return Err(ScenarioError::Validation(format!(
                    "species '{}' defined more than once",
                    species.name
                )));
            }
            let attributes = &species.attributes;
            if attributes.minimum_breeding_age > attributes.maximum_breeding_age {
                return Err(ScenarioError::Validation(format!(
                    "species '{}' has minimum breeding age above its maximum",
                    species.name
                )));
            }
            if attributes.minimum_temperature > attributes.maximum_temperature {
                return Err(ScenarioError::Validation(format!(
                    "species '{}' has minimum temperature above its maximum",
                    species.name
                )));
            }
        }

        let mut habitat_names = HashSet::new();
        for habitat in &self.habitats {
            if !habitat_names.insert(habitat.name.as_str()) {
                return Err(ScenarioError::Validation(format!(
                    "habitat '{}' defined more than once",
                    habitat.name
                )));
            }
        }

        Ok(())
    }

    pub fn build_species(&self) -> Vec<Species> {
        self.species
            .iter()
            .map(|config| Species {
                name: config.name.clone(),
                monthly_food_consumption: config.attributes.monthly_food_consumption,
                monthly_water_consumption: config.attributes.monthly_water_consumption,
                life_span: config.attributes.life_span,
                minimum_breeding_age: config.attributes.minimum_breeding_age,
                maximum_breeding_age: config.attributes.maximum_breeding_age,
                gestation_period: config.attributes.gestation_period,
                minimum_temperature: config.attributes.minimum_temperature,
                maximum_temperature: config.attributes.maximum_temperature,
            })
            .collect()
    }

    pub fn build_habitats(&self) -> Vec<Habitat> {
        self.habitats
            .iter()
            .map(|config| Habitat {
                name: config.name.clone(),
                monthly_food: config.monthly_food,
                monthly_water: config.monthly_water,
                temperatures: config.average_temperature,
            })
            .collect()
    }

    pub fn build_simulator(&self) -> Simulator {
        Simulator::new(
            self.years,
            self.iterations,
            self.build_species(),
            self.build_habitats(),
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
years: 5
iterations: 10
species:
  - name: ibex
    attributes:
      monthly_food_consumption: 3
      monthly_water_consumption: 4
      life_span: 20
      minimum_breeding_age: 2
      maximum_breeding_age: 10
      gestation_period: 6
      minimum_temperature: 0
      maximum_temperature: 90
habitats:
  - name: steppe
    monthly_food: 100
    monthly_water: 150
    average_temperature:
      summer: 85
      spring: 60
      fall: 50
      winter: 30
"#;

    #[test]
    fn minimal_scenario_parses_with_default_seed() {
        let scenario = Scenario::from_yaml(MINIMAL).unwrap();
        assert_eq!(scenario.years, 5);
        assert_eq!(scenario.iterations, 10);
        assert_eq!(scenario.seed, 7, "seed falls back to the default");
        assert_eq!(scenario.species.len(), 1);
        assert_eq!(scenario.habitats.len(), 1);

        let habitats = scenario.build_habitats();
        assert_eq!(habitats[0].temperatures.winter, 30);
        let species = scenario.build_species();
        assert_eq!(species[0].gestation_period, 6);
    }

    #[test]
    fn explicit_seed_wins_over_default() {
        let text = MINIMAL.replace("years: 5", "years: 5\nseed: 99");
        let scenario = Scenario::from_yaml(&text).unwrap();
        assert_eq!(scenario.seed, 99);
    }

    #[test]
    fn zero_years_is_rejected() {
        let text = MINIMAL.replace("years: 5", "years: 0");
        assert!(Scenario::from_yaml(&text).is_err());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let text = MINIMAL.replace("iterations: 10", "iterations: 0");
        assert!(Scenario::from_yaml(&text).is_err());
    }

    #[test]
    fn inverted_breeding_ages_are_rejected() {
        let text = MINIMAL.replace("minimum_breeding_age: 2", "minimum_breeding_age: 12");
        assert!(Scenario::from_yaml(&text).is_err());
    }

    #[test]
    fn inverted_temperature_band_is_rejected() {
        let text = MINIMAL.replace("minimum_temperature: 0", "minimum_temperature: 95");
        assert!(Scenario::from_yaml(&text).is_err());
    }

    #[test]
    fn duplicate_habitat_names_are_rejected() {
        let scenario = Scenario::from_yaml(MINIMAL).unwrap();
        let mut duplicated = scenario.clone();
        duplicated.habitats.push(scenario.habitats[0].clone());
        assert!(matches!(
            duplicated.validate(),
            Err(ScenarioError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_species_names_are_rejected() {
        let scenario = Scenario::from_yaml(MINIMAL).unwrap();
        let mut duplicated = scenario.clone();
        duplicated.species.push(scenario.species[0].clone());
        assert!(matches!(
            duplicated.validate(),
            Err(ScenarioError::Validation(_))
        ));
    }

    #[test]
    fn missing_species_list_is_rejected() {
        let text = r#"
years: 5
iterations: 10
species: []
habitats: []
"#;
        assert!(Scenario::from_yaml(text).is_err());
    }
}
