//! Data-dependent UI components.
//!
//! Each component declares its query descriptor statically and renders one
//! of three states: loading (no cached outcome yet), data, or its own error
//! fallback. Page-level composition lives in `app`.

pub mod greeting;
pub mod hello;
pub mod viewer;
