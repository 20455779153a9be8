//! Scenario tests for publish runs

mod skip_conditions;
