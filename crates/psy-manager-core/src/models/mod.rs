//! Domain models for the patient directory.

mod mood;
mod note;
mod patient;

pub use mood::*;
pub use note::*;
pub use patient::*;
