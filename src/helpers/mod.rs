//! Helper functions shared by the generation flows

mod date;

pub use date::*;
