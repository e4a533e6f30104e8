//! JSON scene files: stage contents plus an optional cue list.

pub mod document;
pub mod model;
