//! CPU mesh extraction: walks a finished voxel grid once, culls interior
//! and back-facing faces, and emits one index list per registered block
//! kind so a renderer can draw the chunk with one call per material.
#![forbid(unsafe_code)]

mod build;
mod face;
mod mesh_build;

pub use build::{extract_mesh, visible_faces};
pub use face::Face;
pub use mesh_build::ChunkMesh;
