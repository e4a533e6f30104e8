pub mod ease;
pub mod value;
