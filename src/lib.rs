// src/lib.rs
pub mod config;
pub mod probe;
pub mod query;
pub mod server;

pub use probe::{from_fn, shared, Probe, ProbeResult, SharedProbe, StatefulProbe};
pub use query::StatusQuery;
pub use server::{Kubeprobes, KubeprobesBuilder, ServerBuilder};
