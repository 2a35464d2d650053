//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, fixture notes databases,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod store;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::MemoCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use store::TestStore;
