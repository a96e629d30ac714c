use std::io;
use std::time::{Duration, Instant};

use byeol_config::Config;
use byeol_core::{Density, Tier, TierConfig, Viewport};
use byeol_scene::{PixelBuffer, Scene, Surface};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use rand::rngs::ThreadRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};

/// Vertical pixels per terminal cell under half-block rendering.
const PIXELS_PER_CELL: f32 = 2.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = byeol_config::load().map_err(|e| color_eyre::eyre::eyre!(e))?;
    let mouse = config.mouse_parallax;

    let terminal = ratatui::init();
    if mouse {
        let _ = execute!(io::stdout(), EnableMouseCapture);
    }
    let result = App::new(config).run(terminal);
    if mouse {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Suspended: the scene renders but global time does not advance.
    paused: bool,
    /// Current fidelity tier.
    tier: Tier,
    /// Current density preset.
    density: Density,
    /// Loaded user configuration.
    config: Config,
    /// The animated scene, created once the terminal size is known.
    scene: Option<Scene>,
    /// Reused pixel framebuffer.
    buffer: PixelBuffer,
    /// Entropy for entity spawning.
    rng: ThreadRng,
    /// Time between frames, from the configured FPS.
    frame_interval: Duration,
    /// When the last frame was drawn.
    last_frame: Instant,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded config.
    pub fn new(config: Config) -> Self {
        let frame_interval = Duration::from_millis(1000 / config.fps() as u64);
        Self {
            running: false,
            paused: false,
            tier: config.tier,
            density: config.density,
            config,
            scene: None,
            buffer: PixelBuffer::new(0, 0),
            rng: rand::thread_rng(),
            frame_interval,
            last_frame: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if self.last_frame.elapsed() >= self.frame_interval {
                terminal.draw(|frame| self.render(frame))?;
                self.last_frame = Instant::now();
            }
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// The scene parameters for the current tier/density selection.
    fn scene_config(&self) -> TierConfig {
        let mut config = self.tier.config().with_density(self.density);
        if let Some(policy) = self.config.reset_policy {
            config = config.with_reset_policy(policy);
        }
        if !self.config.mouse_parallax {
            config.enable_parallax = false;
        }
        config
    }

    /// Rebuild the scene at the current viewport, after a tier or
    /// density change.
    fn reseed_scene(&mut self) {
        if let Some(scene) = &self.scene {
            let viewport = *scene.viewport();
            self.scene = Some(Scene::new(self.scene_config(), viewport, &mut self.rng));
        }
    }

    /// Renders one frame: tick the scene into the pixel buffer and put
    /// the buffer on screen with a one-line help bar at the bottom.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        // Half-block cells carry two vertical pixels each.
        let (width, height) = (
            area.width as usize,
            (area.height as f32 * PIXELS_PER_CELL) as usize,
        );

        if self.scene.is_none() && width > 0 && height > 0 {
            let viewport = Viewport::new(width as f32, height as f32).with_scale(PIXELS_PER_CELL);
            self.scene = Some(Scene::new(self.scene_config(), viewport, &mut self.rng));
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        self.buffer.resize(width, height);
        if self.paused {
            scene.render(&mut self.buffer);
        } else {
            scene.tick(&mut self.buffer, &mut self.rng);
        }

        frame.render_widget(Paragraph::new(self.buffer.to_lines()), area);

        // Help text over the bottom row.
        if area.height > 0 {
            let state = if self.paused { "paused" } else { self.tier.name() };
            let help = Line::from(vec![
                format!(" {state} ").bold().white(),
                "q".bold().white(),
                " quit  ".dark_gray(),
                "t".bold().white(),
                " tier  ".dark_gray(),
                "d".bold().white(),
                format!(" density ({})  ", self.density.name()).dark_gray(),
                "space".bold().white(),
                " pause".dark_gray(),
            ])
            .centered();
            let bottom = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            frame.render_widget(help, bottom);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with a timeout derived from the frame cadence.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .frame_interval
            .saturating_sub(self.last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                    if let Some(scene) = self.scene.as_mut() {
                        scene
                            .pointer_moved(mouse.column as f32, mouse.row as f32 * PIXELS_PER_CELL);
                    }
                }
                Event::Resize(width, height) => {
                    if let Some(scene) = self.scene.as_mut() {
                        scene.handle_resize(width as f32, height as f32 * PIXELS_PER_CELL);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.cycle_tier(),
            (_, KeyCode::Char('d')) => self.cycle_density(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle to the next fidelity tier and reseed the scene.
    fn cycle_tier(&mut self) {
        self.tier = self.tier.next();
        self.reseed_scene();
    }

    /// Cycle to the next density preset and reseed the scene.
    fn cycle_density(&mut self) {
        self.density = self.density.next();
        self.reseed_scene();
    }

    /// Toggle between the Running and Suspended scheduler states.
    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
