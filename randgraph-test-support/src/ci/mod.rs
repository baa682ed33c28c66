//! Knobs read from the environment by CI jobs and local runs.

pub mod property_test_profile;
