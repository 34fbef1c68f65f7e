//! Interactive particle field.

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::info;
use pagefx_particles::{EventKind, FieldState, ParticleField, ParticleFieldConfig};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

use crate::terminal::{MouseCapture, TerminalHost, cell_center};

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated field, hosted in the terminal.
    field: ParticleField<TerminalHost>,
    /// Time between two animation frames.
    frame_interval: Duration,
}

impl App {
    /// Construct a new instance of [`App`] for a `columns` x `rows` canvas.
    pub fn new(
        config: ParticleFieldConfig,
        seed: Option<u64>,
        fps: u32,
        columns: u16,
        rows: u16,
    ) -> Self {
        let mut field = ParticleField::new(TerminalHost::new(columns, rows), config);
        if let Some(seed) = seed {
            field = field.with_seed(seed);
        }
        Self {
            running: false,
            field,
            frame_interval: Duration::from_secs(1) / fps.max(1),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let _mouse = MouseCapture::enable(stdout())?;
        self.running = true;
        self.field.mount();
        info!("particle field {:?}", self.field.state());

        let mut next_frame = Instant::now();
        while self.running {
            if self.field.host_mut().take_frame().is_some() {
                self.field.on_frame();
            }
            terminal.draw(|frame| self.render(frame))?;

            next_frame += self.frame_interval;
            let now = Instant::now();
            if next_frame < now {
                next_frame = now;
            }
            self.handle_crossterm_events(next_frame - now)?;
        }

        self.field.destroy();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let [canvas_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        self.field.host().canvas().paint(frame, canvas_area);

        let config = self.field.config();
        let status = match self.field.state() {
            FieldState::Paused => " paused ",
            _ => "",
        };
        let help = Line::from(vec![
            status.reversed(),
            " q".bold(),
            " quit  ".dark_gray(),
            "space".bold(),
            " pause  ".dark_gray(),
            "r".bold(),
            " reseed  ".dark_gray(),
            "c".bold(),
            (if config.curved_lines {
                " straight lines  "
            } else {
                " curved lines  "
            })
            .dark_gray(),
            "p".bold(),
            (if config.parallax {
                " parallax off"
            } else {
                " parallax on"
            })
            .dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the animation keeps its frame rate.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(columns, rows) => self.on_resize(columns, rows),
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
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('r')) => self.field.reseed(),
            (_, KeyCode::Char('c')) => self.toggle_curved_lines(),
            (_, KeyCode::Char('p')) => self.toggle_parallax(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !self.field.host().is_listening(EventKind::PointerMove) {
            return;
        }
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.field
                .on_pointer_move(cell_center(mouse.column, mouse.row));
        }
    }

    /// The help line takes the last row. A field that could not mount on a
    /// too-small terminal mounts once there is room.
    fn on_resize(&mut self, columns: u16, rows: u16) {
        self.field
            .host_mut()
            .resize(columns, rows.saturating_sub(1));
        if self.field.state() == FieldState::Uninitialized {
            self.field.mount();
        } else if self.field.host().is_listening(EventKind::Resize) {
            self.field.on_resize();
        }
    }

    fn toggle_pause(&mut self) {
        match self.field.state() {
            FieldState::Running => self.field.pause(),
            FieldState::Paused => self.field.resume(),
            _ => {}
        }
    }

    fn toggle_curved_lines(&mut self) {
        let mut config = self.field.config().clone();
        config.curved_lines = !config.curved_lines;
        self.field.set_config(config);
    }

    fn toggle_parallax(&mut self) {
        let mut config = self.field.config().clone();
        config.parallax = !config.parallax;
        self.field.set_config(config);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
