pub mod interviewer;

pub use interviewer::Interviewer;
