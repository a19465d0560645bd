use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

pub const MIN_DISTANCE: f32 = 12.0;
pub const MAX_DISTANCE: f32 = 200.0;

// vertical
pub const FOV: f32 = std::f32::consts::FRAC_PI_2;
pub const NEAR: f32 = 1.0;
pub const FAR: f32 = 1000.0;

/// A camera orbiting the origin, looking at it.
///
/// Whatever handles the mouse feeds it pixel deltas through
/// [`OrbitCamera::rotate`] and [`OrbitCamera::zoom`]; it holds no input
/// state of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    // around y
    pub yaw: f32,
    // around x
    pub pitch: f32,
    pub radians_per_pixel: f32,
    pub distance_per_pixel: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 25.0,
            yaw: 0.0,
            pitch: 0.0,
            radians_per_pixel: 0.005,
            distance_per_pixel: 0.05,
        }
    }
}

impl OrbitCamera {
    /// Dragging right swings the camera left around the target, dragging
    /// down swings it up.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.radians_per_pixel;
        self.pitch -= dy * self.radians_per_pixel;
    }

    pub fn zoom(&mut self, dy: f32) {
        self.distance =
            (self.distance + dy * self.distance_per_pixel).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(0.0, 0.0, -self.distance))
            * Matrix4::from_axis_angle(&Vector3::y_axis(), -self.yaw)
            * Matrix4::from_axis_angle(&Vector3::x_axis(), -self.pitch)
    }

    /// Projection for a viewport `aspect` (width / height) wide. Far
    /// enough out that the camera never clips the target at max zoom.
    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        Perspective3::new(aspect, FOV, NEAR, FAR).to_homogeneous()
    }

    /// Where the camera is in world space.
    pub fn eye(&self) -> Point3<f32> {
        let inverse = Matrix4::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), self.yaw)
            * Matrix4::new_translation(&Vector3::new(0.0, 0.0, self.distance));
        inverse.transform_point(&Point3::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(100_000.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
        cam.zoom(-20.0);
        assert!((cam.distance - (MAX_DISTANCE - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn drag_turns_by_pixels() {
        let mut cam = OrbitCamera::default();
        cam.rotate(100.0, -200.0);
        assert!((cam.yaw + 0.5).abs() < 1e-6);
        assert!((cam.pitch - 1.0).abs() < 1e-6);
    }

    #[test]
    fn eye_stays_at_distance() {
        let mut cam = OrbitCamera::default();
        cam.rotate(321.0, 123.0);
        let eye = cam.eye();
        assert!((eye.coords.norm() - cam.distance).abs() < 1e-4);
        // the eye sits at the view's origin
        let in_view = cam.view_matrix().transform_point(&eye);
        assert!(in_view.coords.norm() < 1e-4);
    }

    #[test]
    fn projection_maps_near_and_far_to_clip_bounds() {
        let proj = OrbitCamera::default().projection(1024.0 / 768.0);
        let near = proj.transform_point(&Point3::new(0.0, 0.0, -NEAR));
        let far = proj.transform_point(&Point3::new(0.0, 0.0, -FAR));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-3);
        // the target at max zoom is inside the frustum
        let target = proj.transform_point(&Point3::new(0.0, 0.0, -MAX_DISTANCE));
        assert!(target.z.abs() < 1.0);
    }

    #[test]
    fn unrotated_eye_is_on_z() {
        let eye = OrbitCamera::default().eye();
        assert!((eye - Point3::new(0.0, 0.0, 25.0)).norm() < 1e-6);
    }
}
