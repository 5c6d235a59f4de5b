use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walkthrough_gate::{GateConfig, GateProfile};
use walkthrough_input::{HELP_TEXT, KeyInput, action_for};
use walkthrough_kernel::{Config, Session, SessionEvent};
use walkthrough_render::{Frame, Projection};
use walkthrough_render_wgpu::{GroundImage, WgpuRenderer};
use walkthrough_tools::SessionInspector;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "walkthrough-desktop", about = "Walk through the maze")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON session config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gate threshold table; overrides the config file
    #[arg(long)]
    gate_profile: Option<GateProfile>,

    /// Image for the ground plane (checkerboard if absent or unreadable)
    #[arg(long)]
    ground_texture: Option<PathBuf>,

    /// Draw each wall's local axes
    #[arg(long)]
    show_axes: bool,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 1000)]
    height: u32,
}

/// Strip a winit key down to what the bindings understand.
fn key_input(key: &Key) -> Option<KeyInput> {
    match key {
        Key::Named(NamedKey::Escape) => Some(KeyInput::Escape),
        Key::Character(s) => s.chars().next().map(|c| KeyInput::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Application state.
struct AppState {
    session: Session,
    projection: Projection,
    show_hud: bool,
    // Left button held
    looking: bool,
}

impl AppState {
    fn new(session: Session, width: u32, height: u32) -> Self {
        Self {
            session,
            projection: Projection::new(width, height),
            show_hud: false,
            looking: false,
        }
    }

    fn handle_key(&mut self, key: &Key) {
        if let Key::Named(NamedKey::F1) = key {
            self.show_hud = !self.show_hud;
            return;
        }
        let Some(action) = key_input(key).and_then(action_for) else {
            return;
        };
        self.session.apply(action);
        self.log_events();
    }

    fn log_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::Moved { from, to } => {
                    tracing::debug!(
                        "moved ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
                        from.x,
                        from.y,
                        from.z,
                        to.x,
                        to.y,
                        to.z
                    );
                }
                SessionEvent::MoveBlocked { attempted, .. } => {
                    tracing::debug!(
                        "rejected ({:.2}, {:.2}, {:.2})",
                        attempted.x,
                        attempted.y,
                        attempted.z
                    );
                }
                SessionEvent::Looked { yaw, pitch } => {
                    tracing::trace!(yaw, pitch, "look");
                }
                SessionEvent::ShaderChanged(program) => {
                    tracing::info!("shader program: {}", program.name());
                }
                SessionEvent::HelpRequested => println!("{HELP_TEXT}"),
                SessionEvent::ShutdownRequested => tracing::info!("shutdown requested"),
            }
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary = SessionInspector::summary(&self.session);
        let report = SessionInspector::clearance_report(&self.session);

        egui::Window::new("Walkthrough")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    summary.position.x, summary.position.y, summary.position.z
                ));
                ui.label(format!(
                    "Yaw: {:.1}  Pitch: {:.1}",
                    summary.yaw, summary.pitch
                ));
                ui.label(format!("Shader: {}", summary.shader.name()));
                ui.label(format!("Gate: {}", summary.verdict));
                ui.separator();

                ui.heading("Clearances");
                for line in &report {
                    ui.monospace(line.to_string());
                }

                ui.separator();
                ui.small("F1: Toggle HUD | LMB drag: Look | WASD: Move | F: Shader | H: Help");
            });
    }
}

/// Window and GPU resources, created on first resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    ground: GroundImage,
    show_axes: bool,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    // Startup failure, reported once the event loop returns
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, ground: GroundImage, show_axes: bool) -> Self {
        Self {
            state,
            ground,
            show_axes,
            gpu: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Maze Walkthrough")
            .with_inner_size(PhysicalSize::new(
                self.state.projection.width,
                self.state.projection.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("walkthrough_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

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

        let mut renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.ground,
        );
        renderer.set_show_axes(self.show_axes);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
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

        Ok(Gpu {
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

    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

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

        let frame = Frame::build(&self.state.session, self.state.projection);
        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.fatal = Some(e);
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
                self.state.session.request_shutdown();
                self.state.log_events();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state
                        .projection
                        .resize(gpu.config.width, gpu.config.height);
                    tracing::info!(
                        "window resized to {}x{} (fov {:.1})",
                        gpu.config.width,
                        gpu.config.height,
                        self.state.projection.fov_y_degrees()
                    );
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(&logical_key);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.looking = btn_state == ElementState::Pressed;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }

        if self.state.session.shutdown_requested() {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.looking {
                self.state.session.look(delta.0 as f32, delta.1 as f32);
                self.state.log_events();
            }
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

    tracing::info!("walkthrough-desktop starting");

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(profile) = cli.gate_profile {
        tracing::info!("gate profile: {profile}");
        config.gate = GateConfig::profile(profile);
    }

    let session = Session::new(&config)?;
    let ground = GroundImage::load_or_default(cli.ground_texture.as_deref());
    let state = AppState::new(session, cli.width, cli.height);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, ground, cli.show_axes);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal.take() {
        return Err(e);
    }
    tracing::info!("walkthrough-desktop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkthrough_common::ShaderProgram;

    fn state() -> AppState {
        AppState::new(Session::new(&Config::default()).unwrap(), 800, 600)
    }

    #[test]
    fn winit_keys_map_to_bindings() {
        assert_eq!(
            key_input(&Key::Named(NamedKey::Escape)),
            Some(KeyInput::Escape)
        );
        assert_eq!(
            key_input(&Key::Character("W".into())),
            Some(KeyInput::Char('w'))
        );
        assert_eq!(key_input(&Key::Named(NamedKey::Enter)), None);
    }

    #[test]
    fn f1_toggles_hud_without_touching_session() {
        let mut s = state();
        s.handle_key(&Key::Named(NamedKey::F1));
        assert!(s.show_hud);
        s.handle_key(&Key::Named(NamedKey::F1));
        assert!(!s.show_hud);
        assert!(s.session.events().is_empty());
    }

    #[test]
    fn keys_drive_the_session() {
        let mut s = state();
        s.handle_key(&Key::Character("f".into()));
        assert_eq!(s.session.shader(), ShaderProgram::Solid);
        s.handle_key(&Key::Character("w".into()));
        assert!((s.session.camera().position().z - 2.8).abs() < 1e-5);
        s.handle_key(&Key::Named(NamedKey::Escape));
        assert!(s.session.shutdown_requested());
        // Events are drained as they are logged.
        assert!(s.session.events().is_empty());
    }
}
