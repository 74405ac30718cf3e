pub mod orchestrator;
pub mod roster;

pub use orchestrator::run_batch_orchestration;
