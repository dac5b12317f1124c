//! Internal edge processor stages made public for benchmarking and testing purposes.
//!
//! Not expected to be used directly, [EdgeProcessor](super::EdgeProcessor) runs them in order:
//! [clip::clip_edges], [sweep::SweepInput::new] and [sweep::sweep].
pub mod clip;
pub mod progress;
pub mod sweep;
pub mod work_edge;
