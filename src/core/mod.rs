//! # Core Module
//!
//! Shared ownership primitives used by the streaming pipeline.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability
//! - `WeakStResource`: Non-owning handle to an `StResource`
//!
//! The chunk store owns every chunk through an `StResource`; render handles keep a
//! `WeakStResource` so that they never outlive or co-own the data they display.

pub mod st_resource;

pub use st_resource::{StResource, WeakStResource};
