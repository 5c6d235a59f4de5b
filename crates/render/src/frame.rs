use glam::{Mat4, Vec2, Vec3};
use walkthrough_common::{Color, Pose, ShaderProgram};
use walkthrough_kernel::Session;
use walkthrough_scene::{Wall, build_all_walls, build_panels};

use crate::projection::Projection;

/// World-space light positions.
pub const LIGHTS: [Vec3; 2] = [Vec3::new(5.0, 5.0, 6.0), Vec3::new(-7.0, -2.0, -10.0)];

/// Sky blue.
pub const CLEAR_COLOR: Color = Color::rgb(128.0 / 255.0, 200.0 / 255.0, 1.0);

/// What a draw item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Ground,
    /// Index into the gate wall sequence.
    Wall(usize),
    /// Index into the standalone panels.
    Panel(usize),
}

/// One draw call: a unit plane in local XZ, scaled to `size` and placed at `pose`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub kind: DrawKind,
    pub pose: Pose,
    /// Extent along local X and local Z.
    pub size: Vec2,
    pub color: Color,
    pub textured: bool,
}

impl DrawItem {
    fn wall(kind: DrawKind, wall: &Wall, color: Color) -> Self {
        Self {
            kind,
            pose: wall.pose,
            size: Vec2::new(wall.width, wall.height),
            color,
            textured: false,
        }
    }

    /// Model matrix including the plane scale.
    pub fn model(&self) -> Mat4 {
        self.pose.to_mat4() * Mat4::from_scale(Vec3::new(self.size.x, 1.0, self.size.y))
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub eye: Pose,
    pub projection: Projection,
    pub shader: ShaderProgram,
    pub lights: [Vec3; 2],
    pub clear_color: Color,
    /// Ground first, then gate walls in sequence order, then panels.
    pub items: Vec<DrawItem>,
}

impl Frame {
    pub fn build(session: &Session, projection: Projection) -> Self {
        let layout = session.layout();
        let ground = layout.ground;
        let side = ground.half_extent * 2.0;

        let mut items = vec![DrawItem {
            kind: DrawKind::Ground,
            pose: Pose::from_translation(Vec3::new(0.0, ground.y, 0.0)),
            size: Vec2::splat(side),
            color: ground.color,
            textured: true,
        }];
        items.extend(
            build_all_walls(layout)
                .iter()
                .enumerate()
                .map(|(i, w)| DrawItem::wall(DrawKind::Wall(i), w, layout.wall_color)),
        );
        items.extend(
            build_panels(layout)
                .iter()
                .enumerate()
                .map(|(i, w)| DrawItem::wall(DrawKind::Panel(i), w, layout.wall_color)),
        );
        tracing::trace!(items = items.len(), "frame built");

        Self {
            eye: *session.camera(),
            projection,
            shader: session.shader(),
            lights: LIGHTS,
            clear_color: CLEAR_COLOR,
            items,
        }
    }

    pub fn view(&self) -> Mat4 {
        self.eye.inverse().to_mat4()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkthrough_kernel::Config;

    fn frame() -> Frame {
        let session = Session::new(&Config::default()).unwrap();
        Frame::build(&session, Projection::default())
    }

    #[test]
    fn draw_list_order() {
        let f = frame();
        assert_eq!(f.items.len(), 12);
        assert_eq!(f.items[0].kind, DrawKind::Ground);
        for i in 0..9 {
            assert_eq!(f.items[1 + i].kind, DrawKind::Wall(i));
        }
        assert_eq!(f.items[10].kind, DrawKind::Panel(0));
        assert_eq!(f.items[11].kind, DrawKind::Panel(1));
    }

    #[test]
    fn only_ground_is_textured() {
        let f = frame();
        assert!(f.items[0].textured);
        assert!(f.items[1..].iter().all(|i| !i.textured));
    }

    #[test]
    fn ground_model_spans_the_plane() {
        let f = frame();
        let corner = f.items[0].model().transform_point3(Vec3::new(0.5, 0.0, 0.5));
        assert!(corner.abs_diff_eq(Vec3::new(500.0, -2.0, 500.0), 1e-3));
    }

    #[test]
    fn wall_model_keeps_center_and_scales_extent() {
        let f = frame();
        let face = &f.items[2];
        assert_eq!(face.size, Vec2::new(5.0, 5.0));
        let center = face.model().transform_point3(Vec3::ZERO);
        assert!(center.abs_diff_eq(Vec3::new(0.0, 0.5, -12.5), 1e-4));
    }

    #[test]
    fn eye_at_start_maps_origin_in_front() {
        let f = frame();
        // The origin sits three units ahead of the camera, on -Z in view space.
        let v = f.view().transform_point3(Vec3::ZERO);
        assert!(v.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-5));
        assert!(!f.view_projection().is_nan());
    }
}
