use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{CursorIcon, Window};

use dpma::application::Application;
use dpma::config::OverlayConfig;
use dpma::panels::{ConsoleBuffer, StaticEntities};
use dpma::pointer::{PointerButton, PointerInput, PointerTracker};
use dpma::surface::CursorKind;
use dpma::view::{resolve_font, Renderer};

use super::host::DemoHost;

/// Redraw cadence while idle
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn cursor_icon(cursor: CursorKind) -> CursorIcon {
    match cursor {
        CursorKind::Default => CursorIcon::Default,
        CursorKind::ColResize => CursorIcon::ColResize,
        CursorKind::RowResize => CursorIcon::RowResize,
        CursorKind::Crosshair => CursorIcon::Crosshair,
        CursorKind::Grab => CursorIcon::Grab,
        CursorKind::Grabbing => CursorIcon::Grabbing,
    }
}

pub struct App {
    config: OverlayConfig,
    overlay: Application,
    tracker: PointerTracker,
    pointer: PointerInput,
    cursor: CursorKind,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    next_frame: Instant,
}

impl App {
    pub fn new(config: OverlayConfig) -> Self {
        let console = ConsoleBuffer::new();
        let entities = StaticEntities::default();
        let host = DemoHost::new(entities.clone(), console.clone());
        let overlay =
            Application::with_default_panels(&config, host, entities, console.clone());
        console.push("dpma ready: drag the dividers, click the host view");

        Self {
            config,
            overlay,
            tracker: PointerTracker::new(),
            pointer: PointerInput::new(),
            cursor: CursorKind::Default,
            renderer: None,
            window: None,
            context: None,
            next_frame: Instant::now(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;

        let font = resolve_font(self.config.font_path.as_deref());
        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            font,
            self.config.background,
        )?;

        tracing::info!(size = ?renderer.size(), "window created");
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Fold a window event into the pointer input; returns whether it changed
    fn update_pointer(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.move_to(position.x as i32, position.y as i32);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return false,
                };
                self.pointer.set_button(button, *state == ElementState::Pressed)
            }
            // Released outside the window; nothing else will report it
            WindowEvent::Focused(false) => self.pointer.release_all(),
            _ => false,
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        // One frame per queued button transition, ending on the latest snapshot
        let mut cursor = self.cursor;
        for pointer in self.pointer.drain() {
            cursor = renderer.render(&mut self.overlay, &mut self.tracker, pointer)?;
        }

        if cursor != self.cursor {
            self.cursor = cursor;
            if let Some(window) = &self.window {
                window.set_cursor(cursor_icon(cursor));
            }
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            tracing::error!("Failed to initialize window: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::warn!("{:#}", e);
                    }
                }
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    tracing::error!("Render failed: {:#}", e);
                    event_loop.exit();
                }
            }
            ref other => {
                if self.update_pointer(other) {
                    window.request_redraw();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            self.next_frame = now + FRAME_INTERVAL;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
