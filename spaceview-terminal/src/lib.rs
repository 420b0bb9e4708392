/// Terminal driver for the spaceview camera
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use spaceview_core::{Camera, MeshAsset, MoveDirection, RotationAxis, RotationSense};
use std::io::{stdout, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

pub mod config;
pub mod renderer;

pub use config::{parse_args, Options, RunMode, ScreenSize, ViewerConfig};
pub use renderer::AsciiRenderer;

/// What a key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(MoveDirection),
    Rotate(RotationAxis, RotationSense),
    Reset,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) => Self::from_char(c),
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Up => Some(Command::Rotate(RotationAxis::X, RotationSense::CounterClockwise)),
            KeyCode::Down => Some(Command::Rotate(RotationAxis::X, RotationSense::Clockwise)),
            KeyCode::Left => Some(Command::Rotate(
                RotationAxis::Z,
                RotationSense::CounterClockwise,
            )),
            KeyCode::Right => Some(Command::Rotate(RotationAxis::Z, RotationSense::Clockwise)),
            _ => None,
        }
    }

    /// Mapping shared by the keyboard and headless scripts.
    ///
    /// Scripts cannot send arrow keys, so `i`/`k` and `j`/`l` stand in for
    /// up/down and left/right.
    pub fn from_char(c: char) -> Option<Self> {
        let command = match c.to_ascii_lowercase() {
            'w' => Command::Move(MoveDirection::Forward),
            's' => Command::Move(MoveDirection::Backward),
            'a' => Command::Move(MoveDirection::Left),
            'd' => Command::Move(MoveDirection::Right),
            'e' => Command::Move(MoveDirection::Up),
            'c' => Command::Move(MoveDirection::Down),
            'i' => Command::Rotate(RotationAxis::X, RotationSense::CounterClockwise),
            'k' => Command::Rotate(RotationAxis::X, RotationSense::Clockwise),
            'j' => Command::Rotate(RotationAxis::Z, RotationSense::CounterClockwise),
            'l' => Command::Rotate(RotationAxis::Z, RotationSense::Clockwise),
            ',' => Command::Rotate(RotationAxis::Y, RotationSense::CounterClockwise),
            '.' => Command::Rotate(RotationAxis::Y, RotationSense::Clockwise),
            'r' => Command::Reset,
            'q' => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    camera: Camera,
    renderer: AsciiRenderer,
    config: ViewerConfig,
    running: bool,
}

impl TerminalApp {
    /// Sizes the character grid to the current terminal.
    pub fn new(mesh: &MeshAsset, config: ViewerConfig) -> anyhow::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Self::with_grid(mesh, config, cols, rows)
    }

    pub fn with_grid(
        mesh: &MeshAsset,
        config: ViewerConfig,
        cols: u16,
        rows: u16,
    ) -> anyhow::Result<Self> {
        let camera = Camera::with_mesh(config.screen.width, config.screen.height, mesh)?;
        Ok(Self {
            camera,
            renderer: AsciiRenderer::new(usize::from(cols), usize::from(rows)),
            config,
            running: true,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Applies one step of `command` to the camera.
    ///
    /// Only a failed reset is reported as an error.
    ///
    /// Move and rotate commands are meant to be repeated
    /// `steps_per_command` times; reset and quit take effect at once.
    pub fn step(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Move(direction) => {
                self.camera.move_on_axis(direction, self.config.move_distance);
            }
            Command::Rotate(axis, sense) => {
                // A rejected rotation leaves the camera unchanged; keep the viewer running
                if let Err(err) =
                    self.camera
                        .rotate_around_axis(axis, self.config.rotation_degrees, sense)
                {
                    debug!(error = %err, "skipping rotation step");
                }
            }
            Command::Reset => self.camera.reset()?,
            Command::Quit => self.running = false,
        }
        Ok(())
    }

    /// Runs `command` as an animated burst, calling `frame` after every step.
    pub fn execute<F>(&mut self, command: Command, mut frame: F) -> anyhow::Result<()>
    where
        F: FnMut(&mut Self) -> anyhow::Result<()>,
    {
        let steps = match command {
            Command::Move(_) | Command::Rotate(..) => self.config.steps_per_command,
            Command::Reset | Command::Quit => 1,
        };
        debug!(?command, steps, "executing command");

        let delay = Duration::from_millis(self.config.step_delay_ms);
        for step in 0..steps {
            self.step(command)?;
            if !self.running {
                break;
            }
            frame(self)?;
            if step + 1 < steps && !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        Ok(())
    }

    /// Position, rounded direction and visible count on one line.
    pub fn status_line(&self) -> String {
        let position = self.camera.position();
        let [dx, dy, dz] = self.camera.direction_rounded();
        format!(
            "pos ({:.3}, {:.3}, {:.3}) | dir ({dx}, {dy}, {dz}) | triangles {}",
            position.x,
            position.y,
            position.z,
            self.camera.visible_count()
        )
    }

    /// Rasterizes the current screen into the character grid.
    pub fn rasterize(&mut self) {
        self.renderer.clear();
        self.renderer.render_screen(self.camera.screen());
    }

    /// The current frame as plain text: the status line followed by the grid.
    pub fn frame_text(&mut self) -> String {
        self.rasterize();
        let mut text = self.status_line();
        for line in self.renderer.to_lines() {
            text.push('\n');
            text.push_str(line.trim_end());
        }
        text
    }

    /// Replays `script` without a terminal, writing every frame to `out`.
    ///
    /// Characters without a binding are skipped.
    pub fn run_script<W: Write>(&mut self, script: &str, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}\n", self.frame_text())?;
        for c in script.chars() {
            let Some(command) = Command::from_char(c) else {
                debug!(key = %c, "no binding");
                continue;
            };
            self.execute(command, |app| {
                writeln!(out, "{}\n", app.frame_text())?;
                Ok(())
            })?;
            if !self.running {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Interactive loop on the alternate screen.
    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        self.render()?;
        while self.running {
            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    if let Some(command) = Command::from_key(code) {
                        self.execute(command, |app| app.render())?;
                    }
                }
                Event::Resize(cols, rows) => {
                    info!(cols, rows, "terminal resized");
                    self.renderer = AsciiRenderer::new(usize::from(cols), usize::from(rows));
                    self.render()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.rasterize();

        let mut stdout = stdout();
        queue!(stdout, Clear(ClearType::All))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            cursor::MoveTo(0, 1),
            Print("W/S/A/D/E/C=Move Arrows=Pitch/Yaw ,/.=Roll R=Reset Q=Quit"),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> ViewerConfig {
        ViewerConfig {
            step_delay_ms: 0,
            steps_per_command: 3,
            ..ViewerConfig::default()
        }
    }

    fn app() -> TerminalApp {
        TerminalApp::with_grid(&MeshAsset::cube(1.0), quiet_config(), 40, 20).unwrap()
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            Command::from_key(KeyCode::Char('W')),
            Some(Command::Move(MoveDirection::Forward))
        );
        assert_eq!(
            Command::from_key(KeyCode::Right),
            Some(Command::Rotate(RotationAxis::Z, RotationSense::Clockwise))
        );
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_char('r'), Some(Command::Reset));
        assert_eq!(Command::from_char('x'), None);
        assert_eq!(Command::from_key(KeyCode::Tab), None);
    }

    #[test]
    fn test_burst_runs_every_step() {
        let mut app = app();
        let mut frames = 0;
        app.execute(Command::Move(MoveDirection::Forward), |_| {
            frames += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(frames, 3);
        assert!((app.camera().position().y - (-10.0 + 0.3)).abs() < 1e-12);

        app.execute(Command::Reset, |_| Ok(())).unwrap();
        assert_eq!(app.camera().position().y, -10.0);
    }

    #[test]
    fn test_quit_stops() {
        let mut app = app();
        let mut frames = 0;
        app.execute(Command::Quit, |_| {
            frames += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(frames, 0);
        assert!(!app.is_running());
    }

    #[test]
    fn test_status_line() {
        let app = app();
        assert_eq!(
            app.status_line(),
            "pos (1.000, -10.000, 1.000) | dir (0, 1, 0) | triangles 6"
        );
    }

    #[test]
    fn test_headless_script() {
        let mut app = app();
        let mut out = Vec::new();
        app.run_script("w?q", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Initial frame plus one per step of the move
        assert_eq!(text.matches("pos (").count(), 4);
        assert!(text.contains('#'));
        assert!(!app.is_running());
    }
}
