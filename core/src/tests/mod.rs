//! Whole-pipeline scenario tests.

mod tripole;
