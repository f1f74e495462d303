#![deny(unsafe_code)]

pub mod resolver;
pub mod score;

pub use resolver::{
    Candidate, MAX_CANDIDATES, NameResolver, Resolution, SIMILARITY_CUTOFF, resolve,
};
pub use score::similarity;
