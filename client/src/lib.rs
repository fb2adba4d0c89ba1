//! Shared UI component tree and the browser half of the SSR handshake.
//!
//! SYSTEM CONTEXT
//! ==============
//! This crate renders in two environments from one source. The server
//! imports it to prefetch the tree's data dependencies and render the
//! initial HTML; the same crate compiled to WASM (feature `hydrate`) boots
//! in the browser, seeds a query client from the snapshot embedded in the
//! page, and attaches to the server-rendered markup without refetching.

pub mod app;
pub mod boot;
pub mod components;
pub mod net;
pub mod prefetch;
pub mod render;
pub mod view;
