pub mod centrality;
pub use centrality::*;

pub mod selection;
pub use selection::*;
