//! Random generation of uniquely-solvable Nagareru instances.

pub mod generator;

pub use generator::{
    generate_many, meaningful_additions, Error, GenParams, GeneratedProblem, Generator, Placement,
};
