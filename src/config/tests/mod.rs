//! Config module tests
//!
//! - Section extraction from INI text and files
//! - Per-option loading with failure isolation
//! - Both ways of telling command and signal triggers apart
