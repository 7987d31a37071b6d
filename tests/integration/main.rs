//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific part of the
//! pipeline against mock hardware. All tests run on the host with no real
//! hardware required.

mod pipeline_tests;
mod reporting_tests;
mod runtime_tests;
