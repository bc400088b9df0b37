// Adapters layer: concrete implementations of the domain ports.

pub mod json_store;
pub mod signal;
pub mod storage;

pub use json_store::JsonGarageStore;
pub use signal::TracingSignalSink;
pub use storage::LocalStorage;
