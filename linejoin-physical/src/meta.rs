//! This module collects functionality that is not directly concerned
//! with relations, like measuring the time spent in blocks of code.

pub mod timing;

pub use timing::TimedCode;
