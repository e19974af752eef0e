use chrono::Utc;

use crate::error::SimError;
use crate::habitat::Habitat;
use crate::report::{HabitatOutcome, RunReport, SpeciesOutcomes};
use crate::rng::RngManager;
use crate::species::Species;
use crate::world::World;

/// Drives one [`World`] per species x habitat pairing and collects their
/// reports. Pairings share nothing but the master seed.
pub struct Simulator {
    years: u32,
    iterations: u32,
    species: Vec<Species>,
    habitats: Vec<Habitat>,
    rng: RngManager,
}

impl Simulator {
    pub fn new(
        years: u32,
        iterations: u32,
        species: Vec<Species>,
        habitats: Vec<Habitat>,
        seed: u64,
    ) -> Self {
        Self {
            years,
            iterations,
            species,
            habitats,
            rng: RngManager::new(seed),
        }
    }

    pub fn run(&self) -> Result<RunReport, SimError> {
        let mut outcomes = Vec::with_capacity(self.species.len());
        for (species_index, species) in self.species.iter().enumerate() {
            let mut habitats = Vec::with_capacity(self.habitats.len());
            for (habitat_index, habitat) in self.habitats.iter().enumerate() {
                let rng = self
                    .rng
                    .pair_rng(species_index as u64, habitat_index as u64);
                let mut world = World::new(habitat, species, self.years, rng);
                let report = world.simulate(self.iterations)?;
                habitats.push(HabitatOutcome {
                    habitat: habitat.name.clone(),
                    report,
                });
            }
            outcomes.push(SpeciesOutcomes {
                species: species.name.clone(),
                habitats,
            });
        }
        Ok(RunReport {
            generated_at: Utc::now(),
            years: self.years,
            iterations: self.iterations,
            species: outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habitat::SeasonalTemperatures;

    fn species(name: &str) -> Species {
        Species {
            name: name.into(),
            monthly_food_consumption: 1,
            monthly_water_consumption: 1,
            life_span: 10,
            minimum_breeding_age: 1,
            maximum_breeding_age: 8,
            gestation_period: 2,
            minimum_temperature: 0,
            maximum_temperature: 100,
        }
    }

    fn habitat(name: &str) -> Habitat {
        Habitat {
            name: name.into(),
            monthly_food: 50,
            monthly_water: 50,
            temperatures: SeasonalTemperatures {
                summer: 80,
                spring: 55,
                fall: 45,
                winter: 25,
            },
        }
    }

    #[test]
    fn every_pairing_is_reported_in_scenario_order() {
        let simulator = Simulator::new(
            2,
            3,
            vec![species("ibex"), species("marmot")],
            vec![habitat("steppe"), habitat("alpine")],
            7,
        );
        let report = simulator.run().unwrap();

        assert_eq!(report.years, 2);
        assert_eq!(report.iterations, 3);
        let species_names: Vec<_> = report
            .species
            .iter()
            .map(|outcome| outcome.species.as_str())
            .collect();
        assert_eq!(species_names, ["ibex", "marmot"]);
        for outcome in &report.species {
            let habitat_names: Vec<_> = outcome
                .habitats
                .iter()
                .map(|entry| entry.habitat.as_str())
                .collect();
            assert_eq!(habitat_names, ["steppe", "alpine"]);
        }
        assert!(report.get("marmot", "alpine").is_some());
    }

    #[test]
    fn runs_are_reproducible_for_a_seed() {
        let build = || {
            Simulator::new(
                2,
                2,
                vec![species("ibex"), species("marmot")],
                vec![habitat("steppe"), habitat("alpine")],
                7,
            )
        };
        let first = build().run().unwrap();
        let second = build().run().unwrap();
        assert_eq!(first.species, second.species);
    }
}
