//! 核心层：错误类型、抓取调度、单次运行编排

pub mod error;
pub mod orchestrator;
pub mod task_scheduler;

pub use error::{DeliveryError, FetchError};
pub use orchestrator::{run_once, Pipeline, RunReport};
pub use task_scheduler::TaskScheduler;
