//! Property-based tests for tree aggregation and manifest codecs

mod aggregation;
mod codec_round_trip;
mod strategies;
