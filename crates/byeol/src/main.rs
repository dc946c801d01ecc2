use std::io;
use std::time::{Duration, Instant};

use byeol_config::Config;
use byeol_core::{PaletteTable, SceneKind, StarsConfig};
use byeol_scenes::SceneState;
use byeol_stars::StarField;
use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// How long to wait for input between frames (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Arrow-key parallax nudge per press.
const PARALLAX_STEP: f32 = 0.05;

/// Highlight color for the active scene in the selector.
const SELECTOR_ACTIVE: Color = Color::Rgb(129, 140, 248);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::load().wrap_err("loading configuration")?;
    let palettes = config.palette_table().wrap_err("building palette table")?;
    // a config naming a palette that does not exist is fatal up front
    palettes
        .lookup(&config.stars.palette)
        .wrap_err("resolving configured palette")?;

    let app = App::new(config, palettes)?;
    let terminal = ratatui::init();
    let _ = execute!(io::stdout(), EnableMouseCapture);
    let result = app.run(terminal);
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Currently displayed scene.
    scene: SceneKind,
    /// Star field tuning, mutated by the controls.
    stars_config: StarsConfig,
    /// Registered palettes, for cycling through names.
    palettes: PaletteTable,
    /// The star lifecycle manager feeding the moving-star scene.
    field: StarField,
    /// Scene renderer state (parallax offset).
    scenes: SceneState,
    /// Whether the control panel overlay is visible.
    show_panel: bool,
    /// Last drawn viewport size, for mapping mouse positions.
    viewport: (u16, u16),
    /// Frame clock origin.
    started_at: Instant,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded configuration.
    pub fn new(config: Config, palettes: PaletteTable) -> color_eyre::Result<Self> {
        let mut app = Self {
            running: false,
            scene: config.scene,
            stars_config: config.stars,
            field: StarField::new(palettes.clone()),
            palettes,
            scenes: SceneState::new(),
            show_panel: true,
            viewport: (0, 0),
            started_at: Instant::now(),
        };
        if app.scene == SceneKind::Stars {
            app.field
                .start(app.stars_config.clone())
                .wrap_err("starting star field")?;
        }
        Ok(app)
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
            self.field.advance(elapsed_ms);
            terminal.draw(|frame| self.render(frame, elapsed_ms))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface: the active scene plus the overlays.
    fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        let area = frame.area();
        self.viewport = (area.width, area.height);

        self.scenes
            .render(frame, self.scene, elapsed_ms, &self.field);

        if self.scene == SceneKind::Stars && self.show_panel {
            self.render_panel(frame);
        }
        self.render_selector(frame);
        self.render_help(frame);
    }

    /// Scene selector: all scenes with the active one highlighted.
    fn render_selector(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 4 {
            return;
        }
        let mut spans: Vec<Span> = Vec::new();
        for (i, scene) in SceneKind::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            let label = format!("{} {}", i + 1, scene.title());
            if scene == self.scene {
                spans.push(label.fg(SELECTOR_ACTIVE).bold());
            } else {
                spans.push(label.dark_gray());
            }
        }
        let selector = Line::from(spans).centered();
        frame.render_widget(selector, Rect::new(0, area.height - 2, area.width, 1));
    }

    /// Help text for the keys active in the current scene.
    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 3 {
            return;
        }
        let mut spans = vec![
            "1-3".bold().cyan(),
            " scene  ".dark_gray(),
            "tab".bold().cyan(),
            " next  ".dark_gray(),
        ];
        match self.scene {
            SceneKind::Stars => spans.extend([
                "-/+".bold().cyan(),
                " speed  ".dark_gray(),
                "[/]".bold().cyan(),
                " density  ".dark_gray(),
                "p".bold().cyan(),
                " palette  ".dark_gray(),
                "c".bold().cyan(),
                " panel  ".dark_gray(),
            ]),
            SceneKind::MilkyWay => spans.extend([
                "mouse/arrows".bold().cyan(),
                " parallax  ".dark_gray(),
            ]),
            SceneKind::Drifter => {}
        }
        spans.extend(["q".bold().cyan(), " quit".dark_gray()]);
        let help = Line::from(spans).centered();
        frame.render_widget(help, Rect::new(0, area.height - 1, area.width, 1));
    }

    /// Control panel overlay showing the current star field tuning.
    fn render_panel(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.width < 34 || area.height < 9 {
            return;
        }
        let lines = vec![
            Line::from(vec![
                "speed    ".dark_gray(),
                format!("{:.1}s", self.stars_config.speed_secs).bold(),
            ]),
            Line::from(vec![
                "density  ".dark_gray(),
                format!("{} stars/burst", self.stars_config.stars_per_burst).bold(),
            ]),
            Line::from(vec![
                "palette  ".dark_gray(),
                self.stars_config.palette.clone().bold(),
            ]),
        ];
        let panel = Paragraph::new(lines).block(Block::bordered().title("controls"));
        frame.render_widget(panel, Rect::new(1, 1, 30, 5));
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the scenes animate between key presses.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => {
                    if matches!(
                        mouse.kind,
                        MouseEventKind::Moved | MouseEventKind::Drag(_)
                    ) {
                        let (width, height) = self.viewport;
                        self.scenes.point_at(mouse.column, mouse.row, width, height);
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        let on_stars = self.scene == SceneKind::Stars;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.switch_scene(self.scene.next())?,
            (_, KeyCode::Char('1')) => self.switch_scene(SceneKind::Stars)?,
            (_, KeyCode::Char('2')) => self.switch_scene(SceneKind::MilkyWay)?,
            (_, KeyCode::Char('3')) => self.switch_scene(SceneKind::Drifter)?,
            (_, KeyCode::Char('+') | KeyCode::Char('=')) if on_stars => {
                self.stars_config.slower();
                self.apply_stars_config()?;
            }
            (_, KeyCode::Char('-')) if on_stars => {
                self.stars_config.faster();
                self.apply_stars_config()?;
            }
            (_, KeyCode::Char(']')) if on_stars => {
                self.stars_config.denser();
                self.apply_stars_config()?;
            }
            (_, KeyCode::Char('[')) if on_stars => {
                self.stars_config.sparser();
                self.apply_stars_config()?;
            }
            (_, KeyCode::Char('p')) if on_stars => {
                self.cycle_palette();
                self.apply_stars_config()?;
            }
            (_, KeyCode::Char('c')) if on_stars => self.show_panel = !self.show_panel,
            (_, KeyCode::Left) => self.scenes.nudge(-PARALLAX_STEP, 0.0),
            (_, KeyCode::Right) => self.scenes.nudge(PARALLAX_STEP, 0.0),
            (_, KeyCode::Up) => self.scenes.nudge(0.0, -PARALLAX_STEP),
            (_, KeyCode::Down) => self.scenes.nudge(0.0, PARALLAX_STEP),
            _ => {}
        }
        Ok(())
    }

    /// Switch the displayed scene. The star field only produces bursts
    /// while its scene is visible; on leaving, live stars drain out.
    fn switch_scene(&mut self, scene: SceneKind) -> color_eyre::Result<()> {
        if scene == self.scene {
            return Ok(());
        }
        if self.scene == SceneKind::Stars && self.field.is_running() {
            self.field.stop()?;
        }
        self.scene = scene;
        if scene == SceneKind::Stars {
            self.field.start(self.stars_config.clone())?;
        }
        Ok(())
    }

    /// Push the current tuning into the running star field. Stars already
    /// mid-flight keep their original expiries.
    fn apply_stars_config(&mut self) -> color_eyre::Result<()> {
        if self.field.is_running() {
            self.field.reconfigure(self.stars_config.clone())?;
        }
        Ok(())
    }

    /// Select the next registered palette name.
    fn cycle_palette(&mut self) {
        let names: Vec<&str> = self.palettes.names().collect();
        let next = match names.iter().position(|n| *n == self.stars_config.palette) {
            Some(i) => names[(i + 1) % names.len()],
            None => match names.first().copied() {
                Some(first) => first,
                None => return,
            },
        };
        self.stars_config.palette = next.to_string();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
