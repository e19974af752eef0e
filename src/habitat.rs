use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Average temperature per season, in the scenario's temperature unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeasonalTemperatures {
    pub summer: i32,
    pub spring: i32,
    pub fall: i32,
    pub winter: i32,
}

/// Immutable resource and climate profile for one habitat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habitat {
    pub name: String,
    pub monthly_food: u32,
    pub monthly_water: u32,
    pub temperatures: SeasonalTemperatures,
}

impl Habitat {
    /// Seasonal average for a calendar month.
    ///
    /// Months 12, 1 and 2 map to winter, 3-5 to spring, 6-8 to summer and
    /// 9-11 to fall. Month 0 is tolerated and falls through to the fall
    /// default; anything above 12 is rejected.
    pub fn average_temperature(&self, month: u32) -> Result<i32, SimError> {
        if month > 12 {
            return Err(SimError::MonthOutOfRange(month));
        }
        Ok(match month {
            12 | 1 | 2 => self.temperatures.winter,
            3..=5 => self.temperatures.spring,
            6..=8 => self.temperatures.summer,
            _ => self.temperatures.fall,
        })
    }
}
