//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, output and coloring
//! textures, pipeline boilerplate, and shader composition.

/// Shared wgpu boilerplate helpers for the compute and blit pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Output storage images and the coloring texture.
pub mod texture;
