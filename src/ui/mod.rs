pub mod controls;
pub mod graph;
pub mod spectrum;

pub use controls::*;
pub use graph::*;
pub use spectrum::*;
