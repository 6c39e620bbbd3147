use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use platformer_assets::{DEFAULT_SHEET_PATH, SpriteSheet};
use platformer_common::SheetSize;
use platformer_input::{Action, InputLatch, KeyState};
use platformer_kernel::World;
use platformer_render::RenderFrame;
use platformer_render_wgpu::SpriteRenderer;
use platformer_tools::WorldInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

#[derive(Parser)]
#[command(name = "platformer-desktop", about = "Sprite-sheet platformer demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Sprite sheet image
    #[arg(long, default_value = DEFAULT_SHEET_PATH)]
    sheet: PathBuf,

    /// Run the simulation at a fixed rate (ticks per second) instead of once per frame
    #[arg(long)]
    tick_rate: Option<f64>,
}

/// Keyboard binding for the four logical inputs.
fn key_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyA => Some(Action::MoveLeft),
        KeyCode::KeyD => Some(Action::MoveRight),
        KeyCode::KeyS => Some(Action::Crouch),
        KeyCode::Space => Some(Action::Jump),
        _ => None,
    }
}

/// Simulation state owned by the event loop.
struct AppState {
    world: World,
    latch: InputLatch,
    sheet_size: SheetSize,
    started: Instant,
    last_frame: Instant,
    // Fixed timestep, only when a tick rate is requested
    tick_rate: Option<f64>,
    tick_accumulator: f64,
    show_overlay: bool,
}

impl AppState {
    fn new(sheet_size: SheetSize, tick_rate: Option<f64>) -> Self {
        let now = Instant::now();
        Self {
            world: World::new(),
            latch: InputLatch::new(),
            sheet_size,
            started: now,
            last_frame: now,
            tick_rate,
            tick_accumulator: 0.0,
            show_overlay: false,
        }
    }

    /// Advance the world for one rendered frame.
    fn update(&mut self, now: Instant) {
        let dt = (now - self.last_frame).min(Duration::from_millis(250));
        self.last_frame = now;

        match self.tick_rate {
            None => self.world.step(&self.latch),
            Some(rate) => {
                let step = 1.0 / rate;
                self.tick_accumulator += dt.as_secs_f64();
                while self.tick_accumulator >= step {
                    self.tick_accumulator -= step;
                    self.world.step(&self.latch);
                }
            }
        }
    }

    fn frame(&self, now: Instant) -> RenderFrame {
        RenderFrame::build(&self.world, self.sheet_size, now - self.started)
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(action) = key_action(key) {
            self.world
                .handle_input(&mut self.latch, action, KeyState::from_pressed(pressed));
            return;
        }

        if pressed && key == KeyCode::F1 {
            self.show_overlay = !self.show_overlay;
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let summary = WorldInspector::summary(&self.world, &self.latch);
        egui::Window::new("Player")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Tick: {}", summary.tick));
                ui.label(format!(
                    "Position: ({:.3}, {:.3})",
                    summary.position[0], summary.position[1]
                ));
                ui.label(format!(
                    "Velocity: ({:.4}, {:.4})",
                    summary.velocity[0], summary.velocity[1]
                ));
                ui.label(format!("Animation: {}", summary.animation));
                ui.label(format!(
                    "Facing: {}",
                    if summary.facing_right { "right" } else { "left" }
                ));
                ui.label(format!("Grounded: {}", summary.grounded));
                ui.separator();
                ui.small("A/D: Move | S: Crouch | Space (release): Jump | F1: Overlay");
            });
    }
}

/// Window, surface and renderers, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SpriteRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, sheet: &SpriteSheet, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Platformer")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("platformer_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create GPU device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = SpriteRenderer::new(&device, &queue, surface_format, sheet);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw the egui overlay on top of the already rendered frame.
    fn render_overlay(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        full_output: egui::FullOutput,
    ) {
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    sheet: SpriteSheet,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    startup_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(sheet: SpriteSheet, tick_rate: Option<f64>) -> Self {
        Self {
            state: AppState::new(sheet.size(), tick_rate),
            sheet,
            gpu: None,
            egui_ctx: EguiContext::default(),
            startup_error: None,
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let now = Instant::now();
        self.state.update(now);
        let frame = self.state.frame(now);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.render_overlay(&self.egui_ctx, &view, full_output);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.sheet, &self.egui_ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.latch.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                // auto-repeat is neither a press nor a release
                if !repeat {
                    self.state
                        .handle_key(key, key_state == ElementState::Pressed);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("platformer-desktop starting");

    if let Some(rate) = cli.tick_rate {
        anyhow::ensure!(rate > 0.0, "--tick-rate must be positive, got {rate}");
        tracing::info!("fixed tick rate: {rate} Hz");
    }

    let sheet = SpriteSheet::load(&cli.sheet)
        .with_context(|| format!("failed to load sprite sheet {}", cli.sheet.display()))?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(sheet, cli.tick_rate);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.startup_error.take() {
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_common::SpriteId;

    fn state() -> AppState {
        AppState::new(SheetSize::new(1500, 1000), None)
    }

    #[test]
    fn wasd_space_bindings() {
        assert_eq!(key_action(KeyCode::KeyA), Some(Action::MoveLeft));
        assert_eq!(key_action(KeyCode::KeyD), Some(Action::MoveRight));
        assert_eq!(key_action(KeyCode::KeyS), Some(Action::Crouch));
        assert_eq!(key_action(KeyCode::Space), Some(Action::Jump));
        assert_eq!(key_action(KeyCode::KeyW), None);
    }

    #[test]
    fn one_tick_per_frame_by_default() {
        let mut s = state();
        let t0 = s.last_frame;
        s.update(t0 + Duration::from_millis(5));
        s.update(t0 + Duration::from_millis(500));
        assert_eq!(s.world.tick(), 2);
    }

    #[test]
    fn fixed_rate_accumulates() {
        let mut s = AppState::new(SheetSize::new(1500, 1000), Some(100.0));
        let t0 = s.last_frame;
        s.update(t0 + Duration::from_millis(35));
        assert_eq!(s.world.tick(), 3);
    }

    #[test]
    fn keys_drive_the_world() {
        let mut s = state();
        s.handle_key(KeyCode::KeyA, true);
        assert!(s.latch.left_held);
        assert!(!s.world.player().facing_right);
        s.update(s.last_frame);
        assert_eq!(s.world.player().animation_state, SpriteId::PlayerRun);

        s.handle_key(KeyCode::Space, true);
        s.handle_key(KeyCode::Space, false);
        assert!(s.world.player().velocity.y > 0.0);
    }

    #[test]
    fn f1_toggles_overlay() {
        let mut s = state();
        s.handle_key(KeyCode::F1, true);
        assert!(s.show_overlay);
        s.handle_key(KeyCode::F1, false);
        assert!(s.show_overlay);
        s.handle_key(KeyCode::F1, true);
        assert!(!s.show_overlay);
    }
}
