pub use task_map::*;

mod task_map;
