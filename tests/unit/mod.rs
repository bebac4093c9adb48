//! Unit tests

pub mod response_tests;
