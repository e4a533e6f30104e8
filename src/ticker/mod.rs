//! Live clock widget: two text fields rewritten once per interval plus a manual refresh log.

pub mod clock;
pub mod surface;
pub mod widget;
