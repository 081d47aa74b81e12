pub mod analyzer;
pub mod devices;
pub mod error;
pub mod graph;

pub use analyzer::SpectrumAnalyzer;
pub use error::GraphError;
pub use graph::SignalGraph;
