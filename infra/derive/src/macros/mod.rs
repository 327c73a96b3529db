pub mod declare;
pub mod error;
