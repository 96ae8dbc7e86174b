//! Unit tests organized by area

pub mod ranking;
