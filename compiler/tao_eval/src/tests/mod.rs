//! Test modules kept out of the implementation files.

mod promise_tests;
mod unary_operators_tests;
