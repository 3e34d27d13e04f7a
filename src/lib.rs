// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clause;
pub mod config;
pub mod pool;
pub mod recorder;
pub mod session;
pub mod stats;
pub mod training;
pub mod util;
