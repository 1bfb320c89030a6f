/// Terminal front end for the cube viewer
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use cubeview_core::{AnimatorState, Command, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod clock;
pub mod keymap;
pub mod renderer;
pub mod settings;

pub use clock::FrameClock;
pub use keymap::Action;
pub use renderer::{AsciiRenderer, MeshId};
pub use settings::{load_settings, Cli, Settings};

/// Rows reserved above the framebuffer for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    scene: Scene<MeshId>,
    renderer: AsciiRenderer,
    clock: FrameClock,
    frame_budget: Duration,
    running: bool,
    help: String,
}

impl TerminalApp {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(settings, width, height)
    }

    fn with_size(settings: &Settings, width: u16, height: u16) -> anyhow::Result<Self> {
        let mut renderer = AsciiRenderer::new(
            width as usize,
            height.saturating_sub(STATUS_ROWS) as usize,
            &settings.scene.camera,
        );
        let mut scene = Scene::new(&settings.scene, &mut renderer)?;
        if let Some(direction) = settings.spin {
            scene.handle_command(Command::Rotate(direction));
        }

        info!(
            width,
            height,
            fps = settings.terminal.fps,
            meshes = renderer.mesh_count(),
            "scene ready"
        );

        Ok(Self {
            scene,
            renderer,
            clock: FrameClock::new(),
            frame_budget: clock::frame_budget(settings.terminal.fps),
            running: true,
            help: keymap::help_line(),
        })
    }

    /// Take over the terminal until the user quits. The terminal is restored
    /// and every mesh released even when the loop fails.
    pub fn run(mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        let setup = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide);

        let result = match setup {
            Ok(()) => self.main_loop(),
            Err(e) => Err(e),
        };

        let restore = execute!(stdout(), ResetColor, terminal::LeaveAlternateScreen, cursor::Show);
        let raw = terminal::disable_raw_mode();

        info!(frames = self.clock.frame_count(), "shutting down");
        self.scene.release(&mut self.renderer);
        debug!(meshes = self.renderer.mesh_count(), "meshes left after release");

        result?;
        restore?;
        raw?;
        Ok(())
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut out = stdout();

        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;
            if !self.running {
                break;
            }

            let dt = self.clock.tick();
            self.scene.frame(dt, &mut self.renderer);
            self.render(&mut out)?;

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_budget {
                std::thread::sleep(self.frame_budget - elapsed);
            }
        }

        Ok(())
    }

    /// Drain every pending event without blocking
    fn handle_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match keymap::action_for(&key) {
                    Some(Action::Quit) => {
                        self.running = false;
                        return Ok(());
                    }
                    Some(Action::Scene(command)) => self.scene.handle_command(command),
                    None => {}
                },
                Event::Resize(width, height) => self.resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(STATUS_ROWS);
        if rows == 0 || width == 0 {
            warn!(width, height, "terminal too small to draw");
        }
        info!(width, height, "terminal resized");
        self.renderer.resize(width as usize, rows as usize);
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.renderer.draw(out, STATUS_ROWS)?;

        let camera = self.scene.camera();
        let state = match self.scene.animator().state() {
            AnimatorState::Idle => "idle".to_string(),
            AnimatorState::Rotating {
                direction,
                accumulated,
            } => format!("turning {direction} {:>3.0}°", accumulated.to_degrees()),
        };
        let pan = camera.planar_offset();
        let status = format!(
            " FPS {:>5.1} | {state} | dist {:.2} | pan {:+.1},{:+.1} | {}",
            self.clock.fps(),
            camera.distance(),
            pan.x,
            pan.y,
            self.help
        );
        let status: String = status.chars().take(self.renderer.width()).collect();

        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::Yellow),
            Print(status),
            Clear(ClearType::UntilNewLine),
            ResetColor
        )?;
        out.flush()
    }
}
