mod grid;
mod hierarchical;
mod radial;

pub use grid::*;
pub use hierarchical::*;
pub use radial::*;
