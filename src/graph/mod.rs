//! Interaction graph representation and derived views

pub mod compressed;
pub mod builder;
pub mod degree;
pub mod subgraph;

pub use builder::GraphBuilder;
pub use compressed::InteractionGraph;
pub use degree::DegreeIndex;
pub use subgraph::InducedSubgraph;
