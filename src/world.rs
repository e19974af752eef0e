use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::animal::{Animal, CauseOfDeath, Sex};
use crate::error::SimError;
use crate::habitat::Habitat;
use crate::report::{round2, DeathBreakdown, WorldReport};
use crate::species::Species;

/// One-in-N odds of a female conceiving while resources are scarce.
const SCARCITY_BREEDING_ODDS: u32 = 200;
/// One-in-N odds of an extreme-weather month.
const EXTREME_WEATHER_ODDS: u32 = 200;
/// Half-width of the uniform band around the seasonal average temperature.
const NORMAL_HALF_RANGE: i32 = 5;
const EXTREME_HALF_RANGE: i32 = 15;

#[derive(Debug, Default)]
struct DeathTally {
    starvation: u64,
    age: u64,
    thirst: u64,
    cold_weather: u64,
    hot_weather: u64,
}

impl DeathTally {
    fn record(&mut self, cause: CauseOfDeath) {
        match cause {
            CauseOfDeath::Starvation => self.starvation += 1,
            CauseOfDeath::Thirst => self.thirst += 1,
            CauseOfDeath::HotWeather => self.hot_weather += 1,
            CauseOfDeath::ColdWeather => self.cold_weather += 1,
            CauseOfDeath::Age => self.age += 1,
        }
    }

    fn total(&self) -> u64 {
        self.starvation + self.age + self.thirst + self.cold_weather + self.hot_weather
    }

    fn percentages(&self) -> DeathBreakdown {
        let total = self.total();
        let share = |count: u64| {
            if total == 0 {
                0.0
            } else {
                round2(count as f64 / total as f64 * 100.0)
            }
        };
        DeathBreakdown {
            starvation: share(self.starvation),
            age: share(self.age),
            thirst: share(self.thirst),
            cold_weather: share(self.cold_weather),
            hot_weather: share(self.hot_weather),
        }
    }
}

/// The per-pairing simulation engine.
///
/// Owns the whole population of one species in one habitat, advances it
/// through the monthly lifecycle and accumulates statistics across every
/// trial of the run. Trials reset the population to two founders; only the
/// aggregate accumulators carry over between them.
pub struct World<'a> {
    habitat: &'a Habitat,
    species: &'a Species,
    total_months: u32,
    month_midpoint: u32,
    month_tally: u32,
    current_month: u32,
    males: Vec<Animal<'a>>,
    females: Vec<Animal<'a>>,
    food: u64,
    water: u64,
    max_population: usize,
    avg_population: f64,
    midpoint_population: Option<usize>,
    mortality_rates: Vec<f64>,
    master_month_tally: u64,
    deaths: DeathTally,
    rng: ChaCha8Rng,
}

impl<'a> World<'a> {
    pub fn new(habitat: &'a Habitat, species: &'a Species, years: u32, rng: ChaCha8Rng) -> Self {
        let total_months = years * 12;
        Self {
            habitat,
            species,
            total_months,
            month_midpoint: total_months / 2,
            month_tally: 0,
            current_month: 1,
            males: Vec::new(),
            females: Vec::new(),
            food: 0,
            water: 0,
            max_population: 0,
            avg_population: 0.0,
            midpoint_population: None,
            mortality_rates: Vec::new(),
            master_month_tally: 0,
            deaths: DeathTally::default(),
            rng,
        }
    }

    /// Run `iterations` independent trials and aggregate them into one
    /// report.
    pub fn simulate(&mut self, iterations: u32) -> Result<WorldReport, SimError> {
        for _ in 0..iterations {
            self.init();
            while self.month_tally < self.total_months {
                self.step()?;
            }
            self.save_mortality_rate();
        }
        Ok(self.build_report())
    }

    /// Reset to the founder pair and a random starting calendar month.
    fn init(&mut self) {
        self.males = vec![Animal::new(self.species, Sex::Male)];
        self.females = vec![Animal::new(self.species, Sex::Female)];
        self.food = 0;
        self.water = 0;
        self.month_tally = 0;
        self.midpoint_population = None;
        self.current_month = self.rng.gen_range(1..=12);
    }

    /// One simulated month, in the model's fixed order.
    fn step(&mut self) -> Result<(), SimError> {
        self.replenish();
        self.give_birth();
        self.record_population();
        self.breed()?;
        self.eat();
        self.drink();
        self.aging();
        self.temperature_stress()?;
        self.death();
        self.advance_month();
        self.month_tally += 1;
        self.master_month_tally += 1;
        Ok(())
    }

    fn replenish(&mut self) {
        self.food += u64::from(self.habitat.monthly_food);
        self.water += u64::from(self.habitat.monthly_water);
    }

    fn give_birth(&mut self) {
        let mut newborns = Vec::new();
        for mother in self.females.iter_mut() {
            if mother.can_birth() {
                newborns.push(mother.birth(&mut self.rng));
            }
        }
        for newborn in newborns {
            match newborn.sex() {
                Sex::Male => self.males.push(newborn),
                Sex::Female => self.females.push(newborn),
            }
        }
    }

    fn record_population(&mut self) {
        let population = self.males.len() + self.females.len();
        if population > self.max_population {
            self.max_population = population;
        }
        // Running mean weighted by every month observed across the whole
        // run, not just the current trial.
        let observed = self.master_month_tally as f64;
        self.avg_population =
            (observed * self.avg_population + population as f64) / (observed + 1.0);
        if self.month_tally == self.month_midpoint {
            self.midpoint_population = Some(population);
        }
    }

    fn breed(&mut self) -> Result<(), SimError> {
        if !self.males.iter().any(Animal::can_breed) {
            return Ok(());
        }
        let sustainable = self.resources_sustainable();
        for female in self.females.iter_mut() {
            if female.can_breed()
                && (sustainable || self.rng.gen_range(0..SCARCITY_BREEDING_ODDS) == 0)
            {
                female.impregnate()?;
            }
        }
        Ok(())
    }

    /// Pooled food and water must each strictly exceed the whole population's
    /// monthly requirement before breeding goes unconditional.
    fn resources_sustainable(&self) -> bool {
        let population = (self.males.len() + self.females.len()) as u64;
        population * u64::from(self.species.monthly_food_consumption) < self.food
            && population * u64::from(self.species.monthly_water_consumption) < self.water
    }

    /// A fresh uniformly random visiting order over the combined population.
    fn shuffled_roster(&mut self) -> Vec<(Sex, usize)> {
        let mut roster: Vec<(Sex, usize)> = (0..self.males.len())
            .map(|index| (Sex::Male, index))
            .chain((0..self.females.len()).map(|index| (Sex::Female, index)))
            .collect();
        roster.shuffle(&mut self.rng);
        roster
    }

    fn eat(&mut self) {
        let need = u64::from(self.species.monthly_food_consumption);
        for (sex, index) in self.shuffled_roster() {
            let animal = match sex {
                Sex::Male => &mut self.males[index],
                Sex::Female => &mut self.females[index],
            };
            if self.food >= need {
                self.food -= need;
                animal.reset_starvation_months();
            } else {
                // The first animal the pool cannot cover finishes off the
                // remainder without being sustained by it.
                self.food = 0;
                animal.increment_starvation_months();
            }
        }
    }

    fn drink(&mut self) {
        let need = u64::from(self.species.monthly_water_consumption);
        for (sex, index) in self.shuffled_roster() {
            let animal = match sex {
                Sex::Male => &mut self.males[index],
                Sex::Female => &mut self.females[index],
            };
            if self.water >= need {
                self.water -= need;
            } else {
                self.water = 0;
                animal.increment_dehydration_months();
            }
        }
    }

    fn aging(&mut self) {
        for animal in self.males.iter_mut().chain(self.females.iter_mut()) {
            animal.increment_age_by_month();
        }
    }

    fn temperature_stress(&mut self) -> Result<(), SimError> {
        let temperature = self.realized_temperature()?;
        if temperature > self.species.maximum_temperature {
            for animal in self.males.iter_mut().chain(self.females.iter_mut()) {
                animal.increment_hot_months();
            }
        } else if temperature < self.species.minimum_temperature {
            for animal in self.males.iter_mut().chain(self.females.iter_mut()) {
                animal.increment_cold_months();
            }
        }
        Ok(())
    }

    /// Uniform draw around the seasonal average, widened on rare
    /// extreme-weather months.
    fn realized_temperature(&mut self) -> Result<i32, SimError> {
        let average = self.habitat.average_temperature(self.current_month)?;
        let half_range = if self.rng.gen_range(0..EXTREME_WEATHER_ODDS) == 0 {
            EXTREME_HALF_RANGE
        } else {
            NORMAL_HALF_RANGE
        };
        Ok(self
            .rng
            .gen_range(average - half_range..=average + half_range))
    }

    fn death(&mut self) {
        let deaths = &mut self.deaths;
        self.males.retain(|animal| match animal.cause_of_death() {
            Some(cause) => {
                deaths.record(cause);
                false
            }
            None => true,
        });
        self.females.retain(|animal| match animal.cause_of_death() {
            Some(cause) => {
                deaths.record(cause);
                false
            }
            None => true,
        });
    }

    fn advance_month(&mut self) {
        self.current_month = if self.current_month == 12 {
            1
        } else {
            self.current_month + 1
        };
    }

    /// The sample's numerator is every death recorded across the whole run so
    /// far, not only this trial's, divided by this trial's midpoint
    /// population.
    fn save_mortality_rate(&mut self) {
        let sample = match self.midpoint_population {
            Some(0) | None => 100.0,
            Some(population) => self.deaths.total() as f64 / population as f64,
        };
        self.mortality_rates.push(sample);
    }

    fn build_report(&self) -> WorldReport {
        let mortality_rate = if self.mortality_rates.is_empty() {
            0.0
        } else {
            round2(self.mortality_rates.iter().sum::<f64>() / self.mortality_rates.len() as f64)
        };
        WorldReport {
            max_pop: self.max_population as u64,
            avg_pop: self.avg_population.round() as u64,
            mortality_rate,
            death_percentages: self.deaths.percentages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::habitat::SeasonalTemperatures;

    fn species() -> Species {
        Species {
            name: "ibex".into(),
            monthly_food_consumption: 1,
            monthly_water_consumption: 1,
            life_span: 50,
            minimum_breeding_age: 0,
            maximum_breeding_age: 50,
            gestation_period: 1,
            minimum_temperature: 0,
            maximum_temperature: 100,
        }
    }

    fn habitat(monthly_food: u32, monthly_water: u32, temperature: i32) -> Habitat {
        Habitat {
            name: "steppe".into(),
            monthly_food,
            monthly_water,
            temperatures: SeasonalTemperatures {
                summer: temperature,
                spring: temperature,
                fall: temperature,
                winter: temperature,
            },
        }
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn sanctuary_grows_without_deprivation_deaths() {
        let species = species();
        let habitat = habitat(1_000_000, 1_000_000, 50);
        let mut world = World::new(&habitat, &species, 1, rng(3));
        let report = world.simulate(1).unwrap();

        assert_eq!(report.death_percentages, DeathBreakdown::default());
        assert_eq!(report.mortality_rate, 0.0);
        // Founders can breed from age 0 with a one-month gestation, so the
        // first birth lands in month 1 whatever sex it draws.
        assert!(report.max_pop >= 3, "max_pop was {}", report.max_pop);
        assert!(report.avg_pop >= 2);
    }

    #[test]
    fn barren_habitat_kills_founders_by_thirst() {
        let species = species();
        let habitat = habitat(0, 0, 50);
        let mut world = World::new(&habitat, &species, 1, rng(5));
        let report = world.simulate(1).unwrap();

        // Dehydration reaches its one-month threshold before starvation's
        // three, so thirst takes the whole population in the first month.
        assert_eq!(report.death_percentages.thirst, 100.0);
        assert_eq!(report.death_percentages.starvation, 0.0);
        assert_eq!(report.death_percentages.age, 0.0);
        assert_eq!(report.max_pop, 2);
        assert_eq!(report.avg_pop, 0);
        assert_eq!(report.mortality_rate, 100.0, "extinct at the midpoint");
    }

    #[test]
    fn scorching_habitat_kills_by_hot_weather_alone() {
        let mut species = species();
        species.maximum_temperature = 50;
        // Coolest possible draw is 150 - 15, far above the tolerance band.
        let habitat = habitat(1_000_000, 1_000_000, 150);
        let mut world = World::new(&habitat, &species, 1, rng(8));
        let report = world.simulate(1).unwrap();

        assert_eq!(report.death_percentages.hot_weather, 100.0);
        assert_eq!(report.death_percentages.thirst, 0.0);
        assert_eq!(report.death_percentages.cold_weather, 0.0);
        assert_eq!(report.mortality_rate, 100.0);
    }

    #[test]
    fn frozen_habitat_kills_by_cold_weather_alone() {
        let mut species = species();
        species.minimum_temperature = 10;
        let habitat = habitat(1_000_000, 1_000_000, -60);
        let mut world = World::new(&habitat, &species, 1, rng(8));
        let report = world.simulate(1).unwrap();

        assert_eq!(report.death_percentages.cold_weather, 100.0);
        assert_eq!(report.death_percentages.hot_weather, 0.0);
    }

    #[test]
    fn mortality_samples_accumulate_deaths_across_trials() {
        // Life span of one year and an unreachable breeding window give two
        // old-age deaths in the last month of every trial, with the
        // population still at two when the midpoint snapshot is taken.
        let species = Species {
            name: "mayfly".into(),
            monthly_food_consumption: 1,
            monthly_water_consumption: 1,
            life_span: 1,
            minimum_breeding_age: 5,
            maximum_breeding_age: 5,
            gestation_period: 1,
            minimum_temperature: 0,
            maximum_temperature: 100,
        };
        let habitat = habitat(1_000_000, 1_000_000, 50);
        let mut world = World::new(&habitat, &species, 1, rng(13));
        let report = world.simulate(2).unwrap();

        // Trial one samples 2 deaths / 2, trial two samples the cumulative
        // 4 deaths / 2. The reported rate is their mean.
        assert_eq!(report.mortality_rate, 1.5);
        assert_eq!(report.death_percentages.age, 100.0);
        assert_eq!(report.max_pop, 2);
        assert_eq!(report.avg_pop, 2);
    }

    #[test]
    fn report_percentages_sum_to_hundred_when_deaths_occurred() {
        let species = species();
        let habitat = habitat(3, 3, 50);
        let mut world = World::new(&habitat, &species, 4, rng(21));
        let report = world.simulate(5).unwrap();

        let total: f64 = report
            .death_percentages
            .entries()
            .iter()
            .map(|(_, percentage)| percentage)
            .sum();
        assert!(
            (total - 100.0).abs() < 0.05,
            "percentages summed to {total}"
        );
    }

    #[test]
    fn zero_iterations_reports_empty_aggregates() {
        let species = species();
        let habitat = habitat(10, 10, 50);
        let mut world = World::new(&habitat, &species, 1, rng(1));
        let report = world.simulate(0).unwrap();

        assert_eq!(report.max_pop, 0);
        assert_eq!(report.avg_pop, 0);
        assert_eq!(report.mortality_rate, 0.0);
        assert_eq!(report.death_percentages, DeathBreakdown::default());
    }

    #[test]
    fn identical_seeds_reproduce_the_report() {
        let species = species();
        let habitat = habitat(5, 5, 50);
        let first = World::new(&habitat, &species, 3, rng(99))
            .simulate(10)
            .unwrap();
        let second = World::new(&habitat, &species, 3, rng(99))
            .simulate(10)
            .unwrap();
        assert_eq!(first, second);
    }
}
