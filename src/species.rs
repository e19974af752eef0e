use serde::{Deserialize, Serialize};

/// Immutable biological parameters for one species.
///
/// Ages and life span are whole years, consumption is units per animal per
/// month, and the temperature band is the inclusive range the species
/// tolerates without stress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub monthly_food_consumption: u32,
    pub monthly_water_consumption: u32,
    pub life_span: u32,
    pub minimum_breeding_age: u32,
    pub maximum_breeding_age: u32,
    pub gestation_period: u32,
    pub minimum_temperature: i32,
    pub maximum_temperature: i32,
}
