//! Reference worlds used by tests, benches and demos.

pub mod adjacency;
pub mod sealed;
pub mod sliding_tiles;
pub mod subtraction;
pub mod water_jugs;

pub use adjacency::{fewest_onward_edges, AdjacencyWorld, GraphBuilder};
pub use sealed::Sealed;
pub use sliding_tiles::{Slide, SlidingTiles};
pub use subtraction::Subtraction;
pub use water_jugs::{JugMove, WaterJugs};
