use crate::frame::RenderFrame;
use crate::projector::Quad;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a projected frame and produces output. It never
/// mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one projected frame.
    fn render(&self, frame: &RenderFrame) -> Self::Output;
}

/// Text renderer for the CLI, logs, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn push_quad(out: &mut String, name: &str, quad: &Quad) {
        out.push_str(&format!("{name}:\n"));
        let labels = ["tr", "br", "bl", "tl"];
        for (label, v) in labels.iter().zip(quad.vertices.iter()) {
            out.push_str(&format!(
                "  {label} pos=({:.3}, {:.3}) uv=({:.4}, {:.4})\n",
                v.position.x, v.position.y, v.tex_coords.x, v.tex_coords.y
            ));
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &RenderFrame) -> String {
        let mut out = format!(
            "=== Frame (tick={}, sprite={}, frame={}) ===\n",
            frame.tick, frame.animation, frame.frame
        );
        Self::push_quad(&mut out, "player", &frame.player);
        Self::push_quad(&mut out, "tile", &frame.tile);
        out
    }
}
