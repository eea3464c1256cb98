//! Camera matrices

use glam::{Mat4, Vec3};

use crate::sim::Camera;

const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;
const EYE_Z: f32 = 5.0;

impl Camera {
    /// Orthographic projection of the visible world area.
    /// Y-up, origin at the world center shifted by the pan offset.
    pub fn projection(&self) -> Mat4 {
        let half = self.half_extents();
        Mat4::orthographic_rh(
            -half.x + self.offset.x,
            half.x + self.offset.x,
            -half.y + self.offset.y,
            half.y + self.offset.y,
            NEAR,
            FAR,
        )
    }

    /// Looking down the -Z axis at the world plane
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, EYE_Z), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;

    fn to_ndc(cam: &Camera, world: Vec2) -> Vec2 {
        let clip = cam.view_projection() * Vec4::new(world.x, world.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y) / clip.w
    }

    #[test]
    fn world_corners_fill_the_screen_at_zoom_one() {
        let cam = Camera::default();
        let ndc = to_ndc(&cam, Vec2::new(400.0, 300.0));
        assert!((ndc - Vec2::ONE).length() < 1e-5);
        let ndc = to_ndc(&cam, Vec2::new(-400.0, -300.0));
        assert!((ndc + Vec2::ONE).length() < 1e-5);
    }

    #[test]
    fn zoom_and_pan_move_the_view() {
        let mut cam = Camera::default();
        cam.zoom = 2.0;
        cam.offset = Vec2::new(100.0, 50.0);
        // The offset is the new screen center
        assert!(to_ndc(&cam, Vec2::new(100.0, 50.0)).length() < 1e-5);
        // Half the world width now spans the screen
        let ndc = to_ndc(&cam, Vec2::new(300.0, 200.0));
        assert!((ndc - Vec2::ONE).length() < 1e-5);
    }

    #[test]
    fn projection_agrees_with_pixel_mapping() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        cam.zoom_in();
        cam.pan(Vec2::new(15.0, -5.0));
        let world = Vec2::new(-120.0, 40.0);
        let ndc = to_ndc(&cam, world);
        let pixel = cam.project(world);
        let expected = Vec2::new((ndc.x + 1.0) * 400.0, (1.0 - ndc.y) * 300.0);
        assert!((pixel - expected).length() < 1e-2);
    }
}
