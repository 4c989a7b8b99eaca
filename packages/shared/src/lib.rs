//! Utilities shared by the Quizroom packages.

pub mod logger;
pub mod time;
