use glam::Mat4;

/// Perspective projection that keeps at least `min_fov_y` degrees of view in
/// both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min_fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            min_fov_y: 60.0,
            near: 0.1,
            far: 50.0,
            width: 1000,
            height: 1000,
        }
    }
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Vertical field of view. Portrait viewports widen it so the horizontal
    /// field never drops below `min_fov_y`.
    pub fn fov_y_degrees(&self) -> f32 {
        if self.width >= self.height {
            return self.min_fov_y;
        }
        let half = (self.min_fov_y * 0.5).to_radians();
        let ratio = self.height.max(1) as f32 / self.width.max(1) as f32;
        2.0 * (half.sin() * ratio).atan2(half.cos()).to_degrees()
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees().to_radians(),
            self.aspect(),
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_and_square_use_minimum() {
        assert_eq!(Projection::new(1280, 720).fov_y_degrees(), 60.0);
        assert_eq!(Projection::new(1000, 1000).fov_y_degrees(), 60.0);
    }

    #[test]
    fn portrait_widens_vertical_fov() {
        let p = Projection::new(500, 1000);
        let fov = p.fov_y_degrees();
        // 2 * atan(tan(30deg) * 2) ~= 98.2 degrees.
        assert!((fov - 98.21).abs() < 0.05, "fov was {fov}");
        // Horizontal field recovers the minimum.
        let h = 2.0 * ((fov * 0.5).to_radians().tan() * p.aspect()).atan().to_degrees();
        assert!((h - 60.0).abs() < 1e-3);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let p = Projection::new(800, 0);
        assert!(p.aspect().is_finite());
        assert!(!p.matrix().is_nan());
    }
}
