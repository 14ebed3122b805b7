//! Conversion stages.
//!
//! ```text
//! input ──▶ extract ──▶ build
//!   │          │          │
//!   └──────────┴──────────┴──▶ fallback (on any stage error)
//! ```
//!
//! 1. [`input`]    resolve a source location to bytes
//! 2. [`extract`]  flatten the source into lines or image metadata
//! 3. [`build`]    render the content into the target format
//! 4. [`fallback`] produce a minimal notice document of the target format

pub mod build;
pub mod extract;
pub mod fallback;
pub mod input;
