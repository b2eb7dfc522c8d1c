use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::direction::Direction;
use crate::view::{Marking, StepObserver, Tick};

/// The width of each cell interior when rendered, in character widths.
pub const CELL_WIDTH: u16 = 2;

/// Horizontal pitch of one cell: interior plus one wall column.
const X_PITCH: u16 = CELL_WIDTH + 1;
/// Vertical pitch of one cell: interior row plus one wall row.
const Y_PITCH: u16 = 2;

/// Set a panic hook to restore terminal state on panic, so the terminal
/// is not left in raw mode or alternate screen even when the panic
/// happens mid-animation.
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen.
/// Also sets a panic hook to restore terminal on panic.
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state.
/// Leave alternate screen and disable raw mode.
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Check that the terminal can fit a `width` x `height` cell grid.
/// Returns the required size as an error message otherwise.
pub fn check_terminal_size(width: u16, height: u16) -> std::io::Result<Result<(), String>> {
    let need_cols = width * X_PITCH + 1;
    let need_rows = height * Y_PITCH + 2;
    let (term_cols, term_rows) = terminal::size()?;
    if term_cols < need_cols || term_rows < need_rows {
        return Ok(Err(format!(
            "Terminal size ({term_cols}x{term_rows}) is too small for a {width}x{height} maze; needs at least {need_cols}x{need_rows}."
        )));
    }
    Ok(Ok(()))
}

/// Print a status line just below a `height`-cell maze.
pub fn print_status(stdout: &mut Stdout, height: u16, message: &str) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, height * Y_PITCH + 1),
        terminal::Clear(ClearType::CurrentLine),
        style::PrintStyledContent(message.to_string().with(Color::Yellow))
    )?;
    stdout.flush()
}

/// Block until the user presses Esc.
pub fn wait_for_esc() -> std::io::Result<()> {
    loop {
        if let event::Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
            && key_event.code == KeyCode::Esc
        {
            return Ok(());
        }
    }
}

/// Terminal renderer for the maze animation.
///
/// Draws the full wall grid once, then repaints only what each event
/// touches: a two-character wall segment erased per connection, a cell
/// interior glyph per path marking. `tick` paces the animation and
/// polls for a quit key; on quit it restores the terminal itself and
/// reports [`Tick::Abort`].
pub struct TerminalView {
    stdout: Stdout,
    /// Grid dimensions in cells.
    width: u16,
    height: u16,
    /// Time to wait between traversal steps.
    step_delay: Duration,
}

impl TerminalView {
    pub fn new(width: u16, height: u16, step_delay: Duration) -> Self {
        TerminalView {
            stdout: std::io::stdout(),
            width,
            height,
            step_delay,
        }
    }

    fn start_index(&self) -> usize {
        0
    }

    fn goal_index(&self) -> usize {
        self.width as usize * self.height as usize - 1
    }

    /// Terminal position of the interior of `cell`.
    fn cell_origin(&self, cell: usize) -> (u16, u16) {
        let x = (cell % self.width as usize) as u16;
        let y = (cell / self.width as usize) as u16;
        (x * X_PITCH + 1, y * Y_PITCH + 1)
    }

    fn glyph(symbol: &'static str, color: Color) -> StyledContent<&'static str> {
        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                CELL_WIDTH as usize,
                "Each cell glyph must occupy exactly the cell width."
            );
        }
        symbol.with(color)
    }

    /// Draw the uncarved grid with every wall standing, plus the start
    /// and goal markers.
    pub fn draw_grid(&mut self) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        let wall_row = format!("{}+\r\n", "+--".repeat(self.width as usize));
        let cell_row = format!("{}|\r\n", "|  ".repeat(self.width as usize));
        for _y in 0..self.height {
            queue!(
                self.stdout,
                style::Print(&wall_row),
                style::Print(&cell_row)
            )?;
        }
        queue!(self.stdout, style::Print(&wall_row))?;

        self.print_cell(self.start_index(), Self::glyph("S ", Color::Blue))?;
        self.print_cell(self.goal_index(), Self::glyph("G ", Color::Magenta))?;
        self.stdout.flush()
    }

    fn print_cell(
        &mut self,
        cell: usize,
        glyph: StyledContent<&'static str>,
    ) -> std::io::Result<()> {
        let (col, row) = self.cell_origin(cell);
        queue!(
            self.stdout,
            cursor::MoveTo(col, row),
            style::PrintStyledContent(glyph.attribute(Attribute::Bold))
        )
    }

    /// Erase the wall segment between `from` and its neighbor in
    /// `direction`.
    fn erase_wall(&mut self, from: usize, direction: Direction) -> std::io::Result<()> {
        let (col, row) = self.cell_origin(from);
        let (wall_col, wall_row, segment) = match direction {
            Direction::West => (col - 1, row, " "),
            Direction::East => (col + CELL_WIDTH, row, " "),
            Direction::North => (col, row - 1, "  "),
            Direction::South => (col, row + 1, "  "),
        };
        queue!(
            self.stdout,
            cursor::MoveTo(wall_col, wall_row),
            style::Print(segment)
        )
    }

    /// Poll pending input without blocking. Esc, `q`, and Ctrl-C all
    /// request an abort.
    fn quit_requested(&mut self) -> std::io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            let event::Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                _ => {}
            }
        }
        Ok(false)
    }
}

impl StepObserver for TerminalView {
    fn on_wall_opened(&mut self, from: usize, direction: Direction) {
        if let Err(e) = self.erase_wall(from, direction) {
            tracing::warn!("failed to draw wall removal: {e}");
        }
    }

    fn on_cell_marked(&mut self, cell: usize, marking: Marking) {
        // Keep the start and goal markers visible.
        if cell == self.start_index() || cell == self.goal_index() {
            return;
        }
        let glyph = match marking {
            Marking::Visited => Self::glyph("* ", Color::Green),
            Marking::Backtracked => Self::glyph(". ", Color::Red),
        };
        if let Err(e) = self.print_cell(cell, glyph) {
            tracing::warn!("failed to draw cell marking: {e}");
        }
    }

    fn tick(&mut self) -> Tick {
        if let Err(e) = self.stdout.flush() {
            tracing::warn!("failed to flush frame: {e}");
        }
        std::thread::sleep(self.step_delay);
        match self.quit_requested() {
            Ok(true) => {
                tracing::info!("quit requested, restoring terminal");
                restore_terminal(&mut self.stdout).ok();
                Tick::Abort
            }
            Ok(false) => Tick::Continue,
            Err(e) => {
                tracing::warn!("input polling failed: {e}");
                Tick::Continue
            }
        }
    }
}
