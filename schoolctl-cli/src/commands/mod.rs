//! Command implementations for the schoolctl CLI

pub mod add;
pub mod list;
#[cfg(feature = "server")]
pub mod serve;

pub use add::run_add;
pub use list::{run_list, run_states};
#[cfg(feature = "server")]
pub use serve::{run_migrate, run_serve};
