use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round to two decimal places, the precision every reported rate uses.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of all deaths attributed to each cause, in percent.
///
/// All five fields are zero when a run recorded no deaths at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathBreakdown {
    pub starvation: f64,
    pub age: f64,
    pub thirst: f64,
    pub cold_weather: f64,
    pub hot_weather: f64,
}

impl DeathBreakdown {
    /// Cause labels paired with their percentages, in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("starvation", self.starvation),
            ("age", self.age),
            ("thirst", self.thirst),
            ("cold_weather", self.cold_weather),
            ("hot_weather", self.hot_weather),
        ]
    }
}

/// Aggregate outcome of every trial for one species x habitat pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldReport {
    pub max_pop: u64,
    pub avg_pop: u64,
    pub mortality_rate: f64,
    pub death_percentages: DeathBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatOutcome {
    pub habitat: String,
    pub report: WorldReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesOutcomes {
    pub species: String,
    pub habitats: Vec<HabitatOutcome>,
}

/// Full run output: one report per species x habitat pairing, in scenario
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub years: u32,
    pub iterations: u32,
    pub species: Vec<SpeciesOutcomes>,
}

impl RunReport {
    pub fn get(&self, species: &str, habitat: &str) -> Option<&WorldReport> {
        self.species
            .iter()
            .find(|outcome| outcome.species == species)?
            .habitats
            .iter()
            .find(|outcome| outcome.habitat == habitat)
            .map(|outcome| &outcome.report)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation ran for {} iterations at {} years per iteration",
            self.iterations, self.years
        )?;
        for species in &self.species {
            writeln!(f, "{}:", species.species)?;
            for outcome in &species.habitats {
                let report = &outcome.report;
                writeln!(f, "        {}:", outcome.habitat)?;
                writeln!(f, "            Average Population: {}", report.avg_pop)?;
                writeln!(f, "            Max Population: {}", report.max_pop)?;
                writeln!(f, "            Mortality Rate: {}%", report.mortality_rate)?;
                writeln!(f, "            Cause of Death:")?;
                for (name, percentage) in report.death_percentages.entries() {
                    writeln!(f, "{:>25}% {}", format_percentage(percentage), name)?;
                }
            }
        }
        Ok(())
    }
}

/// A clean 100 keeps its two trailing zeros; everything else prints as the
/// rounded number does.
fn format_percentage(value: f64) -> String {
    if value == 100.0 {
        "100.00".to_string()
    } else {
        format!("{value}")
    }
}
