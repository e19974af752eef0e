use rand::Rng;

use crate::error::SimError;
use crate::species::Species;

/// Consecutive starving months an animal survives before dying.
pub const MAX_STARVATION_MONTHS: u32 = 3;
/// Consecutive dehydrated months an animal survives before dying.
pub const MAX_DEHYDRATION_MONTHS: u32 = 1;
/// Consecutive too-hot months an animal survives before dying.
pub const MAX_HOT_MONTHS: u32 = 1;
/// Consecutive too-cold months an animal survives before dying.
pub const MAX_COLD_MONTHS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Uniform 50/50 draw, used for newborns.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_range(0..2) == 0 {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// Why an animal died, in the priority order the death check applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseOfDeath {
    Starvation,
    Thirst,
    HotWeather,
    ColdWeather,
    Age,
}

/// One organism: age, sex, pregnancy state and the four hazard counters.
///
/// Animals are owned exclusively by the [`World`](crate::world::World) that
/// created them; the species reference is shared and read-only.
pub struct Animal<'a> {
    species: &'a Species,
    sex: Sex,
    age_in_months: u32,
    starvation_months: u32,
    dehydration_months: u32,
    hot_months: u32,
    cold_months: u32,
    is_pregnant: bool,
    gestation_months: u32,
}

impl<'a> Animal<'a> {
    pub fn new(species: &'a Species, sex: Sex) -> Self {
        Self {
            species,
            sex,
            age_in_months: 0,
            starvation_months: 0,
            dehydration_months: 0,
            hot_months: 0,
            cold_months: 0,
            is_pregnant: false,
            gestation_months: 0,
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn species(&self) -> &Species {
        self.species
    }

    /// Age in whole years, truncating partial years.
    pub fn age(&self) -> u32 {
        self.age_in_months / 12
    }

    pub fn can_breed(&self) -> bool {
        !self.is_pregnant
            && self.age() >= self.species.minimum_breeding_age
            && self.age() <= self.species.maximum_breeding_age
    }

    /// A pregnancy comes to term only when gestation has advanced to exactly
    /// the species' gestation period. An animal whose age is never advanced
    /// therefore never births.
    pub fn can_birth(&self) -> bool {
        self.is_pregnant && self.gestation_months == self.species.gestation_period
    }

    pub fn impregnate(&mut self) -> Result<(), SimError> {
        if self.sex == Sex::Male {
            return Err(SimError::ImpregnatedMale);
        }
        self.is_pregnant = true;
        Ok(())
    }

    /// Delivers one offspring of the same species with a random sex and
    /// resets this animal's pregnancy. The caller inserts the newborn into
    /// the collection matching its sex.
    pub fn birth(&mut self, rng: &mut impl Rng) -> Animal<'a> {
        let newborn = Animal::new(self.species, Sex::random(rng));
        self.is_pregnant = false;
        self.gestation_months = 0;
        newborn
    }

    /// Ages one month; a pregnancy advances on the same tick.
    pub fn increment_age_by_month(&mut self) {
        self.age_in_months += 1;
        if self.is_pregnant {
            self.gestation_months += 1;
        }
    }

    pub fn increment_starvation_months(&mut self) {
        self.starvation_months += 1;
    }

    /// Starvation is the only hazard that recovers: a full meal clears it.
    pub fn reset_starvation_months(&mut self) {
        self.starvation_months = 0;
    }

    pub fn increment_dehydration_months(&mut self) {
        self.dehydration_months += 1;
    }

    pub fn increment_hot_months(&mut self) {
        self.hot_months += 1;
    }

    pub fn increment_cold_months(&mut self) {
        self.cold_months += 1;
    }

    pub fn is_starved(&self) -> bool {
        self.starvation_months >= MAX_STARVATION_MONTHS
    }

    pub fn is_dehydrated(&self) -> bool {
        self.dehydration_months >= MAX_DEHYDRATION_MONTHS
    }

    pub fn is_hot(&self) -> bool {
        self.hot_months >= MAX_HOT_MONTHS
    }

    pub fn is_cold(&self) -> bool {
        self.cold_months >= MAX_COLD_MONTHS
    }

    pub fn is_old(&self) -> bool {
        self.age() >= self.species.life_span
    }

    /// First matching hazard in priority order, or `None` while the animal
    /// survives. Each death is attributed to exactly one cause.
    pub fn cause_of_death(&self) -> Option<CauseOfDeath> {
        if self.is_starved() {
            Some(CauseOfDeath::Starvation)
        } else if self.is_dehydrated() {
            Some(CauseOfDeath::Thirst)
        } else if self.is_hot() {
            Some(CauseOfDeath::HotWeather)
        } else if self.is_cold() {
            Some(CauseOfDeath::ColdWeather)
        } else if self.is_old() {
            Some(CauseOfDeath::Age)
        } else {
            None
        }
    }
}
