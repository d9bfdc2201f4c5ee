//! Database layer - connection pool, bootstrap, migrations, repositories
//!
//! Every request acquires its own pooled connection; nothing is held
//! across requests. The schema is migrated once at startup.

pub mod bootstrap;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use bootstrap::ensure_database;
pub use pool::create_pool;
pub use repos::*;
