pub mod status;
pub mod task;
pub mod webhook;
