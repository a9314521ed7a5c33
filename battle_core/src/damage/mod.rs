//! Damage system - InteractionParameters in, InteractionResult out

mod filter;
mod outcome;
mod params;
mod pipeline;
pub mod steps;

pub use filter::filter_statuses;
pub use outcome::{InteractionOutcome, InteractionResult};
pub use params::InteractionParameters;
pub use pipeline::{CalculationStep, DamagePipeline, InteractionWorking, StepContext};
