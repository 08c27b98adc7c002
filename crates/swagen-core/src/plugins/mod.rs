//! Built-in plugins.

mod fix_ref;
mod hash_names;
mod log_progress;

pub use fix_ref::FixRefPlugin;
pub use hash_names::HashNamesPlugin;
pub use log_progress::LogPlugin;
