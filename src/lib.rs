//! Morphent: Entropy Analysis Library
//!
//! A library for ranking morphological variables by Shannon entropy,
//! quantile discretization and information gain about a target
//! classification (species, age group, ...).

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
