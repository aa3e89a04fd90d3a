pub mod classify;
pub mod extract;
pub mod reply;
pub mod report;
pub mod resolve;
pub mod traits;
pub mod worker;

pub use report::RunReport;
pub use worker::{BotError, Worker, WorkerOptions};
