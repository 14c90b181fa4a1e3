//! Pipeline module - entropy, discretization and information gain

pub mod analysis;
pub mod discretize;
pub mod entropy;
pub mod error;
pub mod gain;
pub mod loader;
pub mod table;

pub use analysis::*;
pub use discretize::*;
pub use entropy::*;
pub use error::*;
pub use gain::*;
pub use loader::*;
pub use table::*;
