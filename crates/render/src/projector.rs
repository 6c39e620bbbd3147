use glam::Vec2;
use platformer_common::{SheetSize, SpriteRect};

/// One corner of a quad: world position plus normalized texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
}

impl QuadVertex {
    /// Packed as `[x, y, u, v]`.
    pub fn to_array(self) -> [f32; 4] {
        [
            self.position.x,
            self.position.y,
            self.tex_coords.x,
            self.tex_coords.y,
        ]
    }
}

/// A textured rectangle ready for upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Top-right, bottom-right, bottom-left, top-left.
    pub vertices: [QuadVertex; 4],
}

impl Quad {
    /// Two triangles sharing the top-left/bottom-right diagonal.
    pub const INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

    pub const TOP_RIGHT: usize = 0;
    pub const BOTTOM_RIGHT: usize = 1;
    pub const BOTTOM_LEFT: usize = 2;
    pub const TOP_LEFT: usize = 3;

    fn from_bounds(min: Vec2, max: Vec2, uv: UvBounds) -> Self {
        Self {
            vertices: [
                QuadVertex {
                    position: Vec2::new(max.x, max.y),
                    tex_coords: Vec2::new(uv.right, uv.top),
                },
                QuadVertex {
                    position: Vec2::new(max.x, min.y),
                    tex_coords: Vec2::new(uv.right, uv.bottom),
                },
                QuadVertex {
                    position: Vec2::new(min.x, min.y),
                    tex_coords: Vec2::new(uv.left, uv.bottom),
                },
                QuadVertex {
                    position: Vec2::new(min.x, max.y),
                    tex_coords: Vec2::new(uv.left, uv.top),
                },
            ],
        }
    }

    pub fn to_arrays(&self) -> [[f32; 4]; 4] {
        self.vertices.map(QuadVertex::to_array)
    }
}

#[derive(Debug, Clone, Copy)]
struct UvBounds {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl UvBounds {
    /// Normalized bounds of `frame` within `rect`, flipped to a bottom-left origin.
    fn of(rect: SpriteRect, frame: u32, sheet: SheetSize) -> Self {
        let sheet_w = sheet.width as f32;
        let sheet_h = sheet.height as f32;
        let tex_x = rect.x as f32;
        let tex_y = sheet_h - rect.y as f32;
        let w = rect.width as f32;
        Self {
            left: (tex_x + frame as f32 * w) / sheet_w,
            right: (tex_x + (frame + 1) as f32 * w) / sheet_w,
            top: tex_y / sheet_h,
            bottom: (tex_y - rect.height as f32) / sheet_h,
        }
    }

    fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            ..self
        }
    }
}

/// Quad for the player: one world unit square anchored at `pos` (bottom-left),
/// showing `frame` of `rect`, mirrored horizontally when facing left.
///
/// `frame` must already be wrapped to `rect.frame_count`.
pub fn project_player(
    rect: SpriteRect,
    frame: u32,
    pos: Vec2,
    facing_right: bool,
    sheet: SheetSize,
) -> Quad {
    debug_assert!(
        frame < rect.frame_count,
        "frame {frame} out of range for {} frames",
        rect.frame_count
    );
    let uv = UvBounds::of(rect, frame, sheet);
    let uv = if facing_right { uv } else { uv.mirrored() };
    Quad::from_bounds(pos, pos + Vec2::ONE, uv)
}

/// Quad for a static tile spanning `min`..`max` in world space, textured with
/// the first frame of `rect` stretched across it.
pub fn project_tile(rect: SpriteRect, min: Vec2, max: Vec2, sheet: SheetSize) -> Quad {
    Quad::from_bounds(min, max, UvBounds::of(rect, 0, sheet))
}
