//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod postgres_store;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{LogMailer, MailerAdapter, ServerDeps, StorageBackend};
pub use memory_store::InMemoryStore;
pub use postgres_store::PostgresStore;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::TestDependencies;
pub use traits::*;
