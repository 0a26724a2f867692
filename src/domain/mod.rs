pub mod homework;

pub use homework::{ApiResponse, HomeworkStatus, PollCursor};
