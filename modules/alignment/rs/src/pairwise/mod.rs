pub use aligner::PairwiseAligner;
pub use paths::OptimalPaths;

pub mod alignment;
pub mod scoring;

mod aligner;
mod dp;
mod paths;
mod trace;
