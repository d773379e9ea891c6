// plagcheck: pairwise textual-overlap detection for document collections
//
// This is the library root. Each module corresponds to one stage of an
// analysis run: loading, normalization, scoring, aggregation, output.

pub mod analysis;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod similarity;
pub mod text;
