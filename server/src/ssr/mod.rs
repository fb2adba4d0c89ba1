//! Server-side rendering pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! One request flows context → fresh query client → prefetch walker →
//! markup → snapshot → document. Everything here is request-scoped; the
//! only shared pieces are the config and the HTTP connection pool.

pub mod context;
pub mod document;
pub mod pipeline;
pub mod transport;
