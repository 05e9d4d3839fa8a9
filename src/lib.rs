//! Client for the ClickUp API: webhook signature checks, webhook decoding, and
//! fetching and updating tasks.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod model;
pub mod signature;
pub mod webhook;

pub use client::{ClickUp, Client};
pub use config::Config;
pub use error::{ClickUpError, ClickUpResult};
pub use mock::MockClient;
pub use model::status::Status;
pub use model::task::{AssigneesUpdate, Task, TaskStatus, TaskUpdateRequest};
pub use model::webhook::{Event, Webhook};
