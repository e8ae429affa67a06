//! CLI parse tests.
