mod insights;
mod tasks;

pub use insights::InsightCommands;
pub use tasks::TaskCommands;
