use crate::Vec3;

/// A ray in 3D space with origin, direction, and time.
///
/// The direction is a unit vector by convention. The `time` field is a
/// sample in [0, 1] used to resolve moving geometry; every bounce of a
/// path keeps the time of the camera ray that started it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
    pub time: f64,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, dir: Vec3, time: f64) -> Self {
        Self { origin, dir, time }
    }

    /// Get the point along the ray at distance d.
    ///
    /// Returns: origin + d * dir
    #[inline]
    pub fn at(&self, d: f64) -> Vec3 {
        self.origin + self.dir * d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let dir = Vec3::Y;
        let ray = Ray::new(origin, dir, 0.5);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.dir, dir);
        assert_eq!(ray.time, 0.5);
    }
}
