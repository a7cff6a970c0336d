/// Terminal front end: input decoding, ASCII rendering and the frame loop
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use fly3d_core::{
    Camera, FramePacer, InputState, Mat4, ObjLoader, Projection, Transform, Vec3, VertexBuffer,
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod controls;
pub mod renderer;

pub use config::ViewerConfig;
pub use controls::{Action, Controls};
pub use renderer::{AsciiRenderer, RenderObject};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

const MESH_COLORS: &[Color] = &[Color::White, Color::Yellow, Color::Cyan, Color::Magenta];

/// Ground plane plus one object per configured mesh.
///
/// The first mesh sits at the origin; the rest are lined up along +X at half
/// scale. Meshes that fail to load are replaced with empty ones.
pub fn build_scene(config: &ViewerConfig) -> Vec<RenderObject> {
    let loader = ObjLoader::new(&config.asset_dir);
    let mut objects = vec![RenderObject::new(
        "ground",
        VertexBuffer::ground_plane(1.0, 40, 16.0),
        Mat4::scale(Vec3::new(80.0, 80.0, 1.0)),
        Color::DarkGreen,
    )];

    for (i, name) in config.meshes.iter().enumerate() {
        let model = if i == 0 {
            Mat4::identity()
        } else {
            Transform::from_position(Vec3::new(4.0 * i as f32, 0.0, 0.0))
                .with_scale(Vec3::new(0.5, 0.5, 0.5))
                .matrix()
        };
        let color = MESH_COLORS[i % MESH_COLORS.len()];
        objects.push(RenderObject::new(name.as_str(), loader.load_or_empty(name), model, color));
    }
    objects
}

/// Main application struct for terminal 3D rendering
pub struct ViewerApp {
    objects: Vec<RenderObject>,
    camera: Camera,
    input: InputState,
    controls: Controls,
    projection: Projection,
    renderer: AsciiRenderer,
    pacer: FramePacer,
    pointer_scale: (f32, f32),
    mouse_captured: bool,
    running: bool,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    pub fn new(objects: Vec<RenderObject>, config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            objects,
            camera: Camera::new(config.camera),
            input: InputState::new(),
            controls: Controls::new(false, config.pointer_scale),
            projection: Projection::for_viewport(
                width as u32,
                height as u32 * CELL_ASPECT,
                config.fov_deg,
            ),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            pacer: FramePacer::new(config.fps, now),
            pointer_scale: config.pointer_scale,
            mouse_captured: true,
            running: true,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        info!("key release reporting: {enhanced}");
        self.controls = Controls::new(enhanced, self.pointer_scale);

        let result = self.main_loop();

        // Cleanup
        if enhanced {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        if self.mouse_captured {
            execute!(stdout(), DisableMouseCapture)?;
        }
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let dt = self.pacer.begin_frame(Instant::now());

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                let action = self.controls.handle_event(&event, &mut self.input);
                self.handle_action(action)?;
            }

            // Update
            self.camera.update(&self.input, dt);
            self.controls.end_frame(&mut self.input);

            // Render
            self.render()?;

            // Update FPS counter
            self.frame_count += 1;
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }

            self.pacer.wait();
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> io::Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleCameraMode => {
                self.camera.toggle_mode();
            }
            Action::ToggleMouseCapture => {
                self.mouse_captured = !self.mouse_captured;
                if self.mouse_captured {
                    execute!(stdout(), EnableMouseCapture)?;
                } else {
                    execute!(stdout(), DisableMouseCapture)?;
                }
                debug!("mouse capture: {}", self.mouse_captured);
            }
            Action::Resize(width, height) => {
                debug!("viewport resized to {width}x{height}");
                self.projection.resize(width as u32, height as u32 * CELL_ASPECT);
                self.renderer.resize(width as usize, height as usize);
            }
            Action::None => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.camera.view_matrix();
        let projection = self.projection.matrix();

        self.renderer.clear();
        for object in &self.objects {
            self.renderer.render_object(object, &view, &projection);
        }

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let p = self.camera.position();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "fly3d | FPS: {:.1} | {:?} | pos ({:.1}, {:.1}, {:.1}) | Space=mode Esc=mouse Q=quit",
                self.fps,
                self.camera.mode(),
                p.x,
                p.y,
                p.z
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
