// Adapters layer: concrete implementations of the domain ports (RPC backend, submission stores).

pub mod rpc;
pub mod storage;

pub use rpc::{FixtureSetupRouter, HttpSetupRouter};
pub use storage::{LocalStorage, LogStore};
