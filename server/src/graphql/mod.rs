//! GraphQL endpoint: parser, resolver-map executor, demo schema.
//!
//! DESIGN
//! ======
//! Queries execute against a resolver map over `serde_json::Value`:
//! resolvers are registered per (type name, field name) and receive coerced
//! arguments plus a per-request context carrying the incoming headers. The
//! parser covers the executable query subset the application speaks;
//! fragments, directives, aliases, and mutations are rejected with
//! descriptive errors.

pub mod execute;
pub mod parse;
pub mod resolvers;

pub use execute::{Context, FieldError, ResolverArgs, Schema};
pub use resolvers::schema;
