// Analysis engine: data models, the pairwise orchestrator, and the
// aggregation used by presentation layers.

pub mod models;
pub mod orchestrator;
pub mod progress;
pub mod summary;

pub use models::{AnalysisResult, ComparisonResult, Document, ProcessedDocument};
pub use orchestrator::Analyzer;
pub use progress::{CancellationFlag, ProgressSink};
pub use summary::PairSummary;
