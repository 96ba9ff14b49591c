//! Integration tests for the crcgen manifest system

mod config_integration;
mod manifest_store;
mod test_utils;
mod tree_builder;
