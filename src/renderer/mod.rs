//! WebGPU rendering module
//!
//! The whole scene is drawn in the fragment shader with signed distance
//! fields; there is no vertex data beyond a fullscreen triangle.

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;
