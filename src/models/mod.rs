mod task;

pub use task::{NewTask, Task};
