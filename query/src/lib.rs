//! Data-query client layer shared by `server` and `client`.
//!
//! SYSTEM CONTEXT
//! ==============
//! This crate owns everything both sides of the SSR handshake agree on: the
//! GraphQL wire shapes, the query descriptors components declare, the
//! request-scoped data cache, and the snapshot that carries cache contents
//! from the server-rendered page into the browser bootstrap. Transports are
//! pluggable so the server can go over loopback HTTP while the browser uses
//! fetch and tests use in-memory stubs.

pub mod cache;
pub mod client;
pub mod descriptor;
pub mod wire;

pub use cache::{DataCache, QueryOutcome, Snapshot};
pub use client::{QueryClient, QueryTransport, SharedTransport, TransportError};
pub use descriptor::QueryDescriptor;
pub use wire::{GraphQlError, GraphQlRequest, GraphQlResponse};
