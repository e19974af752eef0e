pub mod animal;
pub mod error;
pub mod habitat;
pub mod report;
pub mod rng;
pub mod scenario;
pub mod simulator;
pub mod species;
pub mod world;

pub use error::SimError;
pub use habitat::Habitat;
pub use report::{RunReport, WorldReport};
pub use scenario::Scenario;
pub use simulator::Simulator;
pub use species::Species;
pub use world::World;
