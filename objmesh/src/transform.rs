use nalgebra::{Matrix3, Matrix4, Vector3};

/// Where a mesh sits in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    // applied x, then y, then z... in matrix order; so z hits the mesh first
    pub rotation: Vector3<f32>,
    /// Move the mesh's bounding box center to its origin before anything else.
    pub center_on_bounds: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
            rotation: Vector3::zeros(),
            center_on_bounds: false,
        }
    }
}

impl Placement {
    pub fn model_matrix(&self, bounds_center: Vector3<f32>) -> Matrix4<f32> {
        let recenter = if self.center_on_bounds {
            Matrix4::new_translation(&-bounds_center)
        } else {
            Matrix4::identity()
        };
        Matrix4::new_translation(&self.position)
            * Matrix4::new_nonuniform_scaling(&self.scale)
            * Matrix4::from_axis_angle(&Vector3::x_axis(), self.rotation.x)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), self.rotation.y)
            * Matrix4::from_axis_angle(&Vector3::z_axis(), self.rotation.z)
            * recenter
    }
}

/// The matrix normals get multiplied by: inverse transpose of the
/// model-view's upper 3x3. `None` if that isn't invertible (zero scale).
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Option<Matrix3<f32>> {
    model_view
        .fixed_slice::<3, 3>(0, 0)
        .into_owned()
        .try_inverse()
        .map(|m| m.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn default_is_identity() {
        let m = Placement::default().model_matrix(Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn centers_before_placing() {
        let placement = Placement {
            position: Vector3::new(0.0, 0.0, -10.0),
            scale: Vector3::repeat(2.0),
            center_on_bounds: true,
            ..Default::default()
        };
        let m = placement.model_matrix(Vector3::new(1.0, 2.0, 3.0));
        let center = m.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert!(close(center.coords, Vector3::new(0.0, 0.0, -10.0)));
        let corner = m.transform_point(&Point3::new(2.0, 2.0, 3.0));
        assert!(close(corner.coords, Vector3::new(2.0, 0.0, -10.0)));
    }

    #[test]
    fn rotation_is_applied_z_first() {
        let placement = Placement {
            rotation: Vector3::new(std::f32::consts::FRAC_PI_2, 0.0, std::f32::consts::FRAC_PI_2),
            ..Default::default()
        };
        let m = placement.model_matrix(Vector3::zeros());
        // z turns +x into +y, then x turns +y into +z
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(close(p.coords, Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model_view = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(&model_view).unwrap();
        assert!(close(n * Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.0, 0.0)));
        assert!(normal_matrix(&Matrix4::zeros()).is_none());
    }
}
