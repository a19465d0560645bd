use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    /// `None` if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Option<Self> {
        let mut points = points.into_iter().map(|&p| Vector3::from(p));
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.inf(&p),
            max: b.max.sup(&p),
        }))
    }

    pub fn center(&self) -> Vector3<f32> {
        self.min + (self.max - self.min) / 2.0
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }
}
