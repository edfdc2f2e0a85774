// File: ./src/model/mod.rs
pub mod assignment;
pub mod course;
pub mod display;
pub mod term;

pub use assignment::Assignment;
pub use course::Course;
pub use term::{Season, Term};
