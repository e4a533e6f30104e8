//! The authored landing-page choreography.
//!
//! Everything here is data: cue tables and initial target state. Side effects the page used to
//! start from callbacks (impact bursts, stretch tweens) are registered up front as ordinary cues.

pub mod impact;
pub mod landing;
pub mod page;
