pub mod aggregator;
pub mod anchor;
pub mod classifier;
pub mod counter;
pub mod detector;
pub mod difficulty;
pub mod pipeline;
pub mod renderer;
pub mod report;
pub mod sampler;
pub mod settings;
