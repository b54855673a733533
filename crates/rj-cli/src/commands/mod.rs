pub mod dispatch;
pub mod insights;
pub mod shared;
pub mod shell;
pub mod summary;
pub mod tasks;
