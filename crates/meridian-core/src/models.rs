pub mod clinical;
pub mod grading;
pub mod request;
pub mod schedule;
pub mod visit;
