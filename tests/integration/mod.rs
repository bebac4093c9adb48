//! Integration tests

pub mod session_flow_tests;
