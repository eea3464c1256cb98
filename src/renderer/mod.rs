//! Presentation boundary
//!
//! The simulation only ever talks to a [`Presenter`]: it registers one mesh per
//! game object, asks for that mesh to be drawn with a model transform each
//! frame, and releases it once the object is swept. Window, context and GPU
//! buffer management live behind the trait.

pub mod camera;
pub mod digits;
pub mod frame;
pub mod headless;
pub mod shapes;
pub mod vertex;

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

pub use frame::draw_frame;
pub use headless::DrawList;
pub use vertex::Vertex;

/// Opaque handle to a registered mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RenderHandle(pub u32);

/// How a vertex list is assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveKind {
    #[default]
    Triangles,
    Lines,
}

/// Failure to obtain or use a renderable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The backend refused to create the mesh
    MeshRejected { reason: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeshRejected { reason } => write!(f, "mesh rejected: {reason}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Rendering backend consumed by the simulation
pub trait Presenter {
    /// Upload a mesh and return a handle for drawing it later
    fn register_renderable(
        &mut self,
        vertices: &[Vertex],
        kind: PrimitiveKind,
    ) -> Result<RenderHandle, RenderError>;

    /// Free a mesh whose object is gone. The handle must not be drawn again.
    fn release(&mut self, handle: RenderHandle);

    /// Start a frame with the camera's combined view-projection matrix
    fn begin_frame(&mut self, _view_projection: Mat4) {}

    /// Draw a registered mesh with the given world-space model transform
    fn render(&mut self, handle: RenderHandle, model: Mat4);
}
