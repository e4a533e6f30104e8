pub mod cue;
pub mod sequence;
pub mod sequencer;
