//! Headless presenter that records meshes and draw calls
//!
//! Used by the native binary (which has no window) and by tests that want to
//! see exactly what a frame would have drawn.

use glam::{Mat4, Vec2};

use super::{Presenter, PrimitiveKind, RenderError, RenderHandle, Vertex};

/// A mesh uploaded through [`Presenter::register_renderable`]
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub kind: PrimitiveKind,
}

impl Mesh {
    /// Color of the first vertex (meshes in this game are flat-colored)
    pub fn color(&self) -> Option<[f32; 3]> {
        self.vertices.first().map(|v| v.color)
    }
}

/// One recorded draw
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub handle: RenderHandle,
    pub model: Mat4,
}

impl DrawCall {
    /// World-space position the model transform places the mesh origin at
    pub fn position(&self) -> Vec2 {
        self.model.w_axis.truncate().truncate()
    }
}

/// Recording presenter
///
/// Released slots go on a free list and are handed out again, so a handle
/// stays valid until its own release.
#[derive(Debug, Default)]
pub struct DrawList {
    meshes: Vec<Option<Mesh>>,
    free: Vec<u32>,
    calls: Vec<DrawCall>,
    view_projection: Mat4,
    frames: u64,
    mesh_limit: Option<usize>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter that refuses to hold more than `limit` live meshes
    pub fn with_mesh_limit(limit: usize) -> Self {
        Self {
            mesh_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn mesh(&self, handle: RenderHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Meshes registered and not yet released
    pub fn mesh_count(&self) -> usize {
        self.meshes.len() - self.free.len()
    }

    /// Draw calls of the most recent frame, in submission order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Draw calls of the most recent frame whose mesh has the given color
    pub fn calls_with_color(&self, color: [f32; 3]) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(move |c| self.mesh(c.handle).and_then(Mesh::color) == Some(color))
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

impl Presenter for DrawList {
    fn register_renderable(
        &mut self,
        vertices: &[Vertex],
        kind: PrimitiveKind,
    ) -> Result<RenderHandle, RenderError> {
        if vertices.is_empty() {
            return Err(RenderError::MeshRejected {
                reason: "empty vertex list".to_string(),
            });
        }
        if let Some(limit) = self.mesh_limit
            && self.mesh_count() >= limit
        {
            return Err(RenderError::MeshRejected {
                reason: format!("mesh limit of {limit} reached"),
            });
        }

        let mesh = Mesh {
            vertices: vertices.to_vec(),
            kind,
        };
        let handle = match self.free.pop() {
            Some(slot) => {
                self.meshes[slot as usize] = Some(mesh);
                RenderHandle(slot)
            }
            None => {
                self.meshes.push(Some(mesh));
                RenderHandle(self.meshes.len() as u32 - 1)
            }
        };
        Ok(handle)
    }

    fn release(&mut self, handle: RenderHandle) {
        if let Some(slot) = self.meshes.get_mut(handle.0 as usize)
            && slot.take().is_some()
        {
            self.free.push(handle.0);
        } else {
            log::warn!("Release of unknown mesh {:?}", handle);
        }
    }

    fn begin_frame(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
        self.calls.clear();
        self.frames += 1;
    }

    fn render(&mut self, handle: RenderHandle, model: Mat4) {
        self.calls.push(DrawCall { handle, model });
    }
}
