//! Unit tests for the task board core.

mod filter_tests;
mod service_tests;
