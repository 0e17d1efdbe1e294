//! Concrete targets buildable from this branch.

pub mod ako_operator;

pub use ako_operator::AkoOperator;
