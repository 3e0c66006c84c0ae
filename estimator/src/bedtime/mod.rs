pub mod engine;
pub mod outcome;

pub use engine::SleepEstimator;
pub use outcome::Bedtime;
