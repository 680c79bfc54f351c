//! Small shared utilities.

pub mod encode;
