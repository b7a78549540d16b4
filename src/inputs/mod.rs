//! Plan inputs, validation and scenario loading

mod data;
pub mod loader;

pub use data::{IsaType, PlanInputs, WithdrawalType};
pub use loader::{
    load_default_scenarios, load_scenarios, load_scenarios_from_reader, Scenario,
    DEFAULT_SCENARIOS_PATH,
};
