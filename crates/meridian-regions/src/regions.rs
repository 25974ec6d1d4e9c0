pub mod neck;
pub mod shoulder;
pub mod elbow;
pub mod lower_back;
pub mod hip;
pub mod knee;
