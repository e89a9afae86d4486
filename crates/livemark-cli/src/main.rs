mod app;
mod render;

use std::fs::File;
use std::io::{Stdout, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use livemark_config::Config;
use livemark_engine::{Document, EditorSession, SelectionRange, Span};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span as TextSpan},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, DEMO_DOCUMENT};

/// Rows taken by the border and the help line.
const CHROME_ROWS: u16 = 3;

#[derive(Parser, Debug)]
#[command(name = "livemark")]
#[command(about = "A terminal Markdown editor that hides syntax markers away from the cursor")]
#[command(version)]
struct Cli {
    /// Markdown file to edit (opens a demo document if omitted)
    file: Option<PathBuf>,

    /// Read settings from this file instead of ~/.config/livemark/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the masked document to stdout and exit
    #[arg(long)]
    print: bool,

    /// Caret byte offset used with --print
    #[arg(long, value_name = "OFFSET", default_value_t = 0)]
    caret: usize,

    /// Write the default settings to the config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    log::info!("livemark starting up");
    if cli.init_config {
        let path = init_config(cli.config.as_deref())?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }
    let config = load_config(cli.config.as_deref())?;

    let (document, path) = match &cli.file {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let document = Document::from_bytes(&bytes)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            (document, path.clone())
        }
        None => (
            Document::from_text(DEMO_DOCUMENT),
            config.untitled_path.clone(),
        ),
    };
    log::info!("Opened {} ({} bytes)", path.display(), document.len());

    if cli.print {
        let mut session = EditorSession::with_kinds(document, config.marker_kinds());
        session.set_selection(vec![SelectionRange::caret(cli.caret)]);
        let text = session.document().text();
        print!("{}", render::render_document(&text, session.masks()));
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(document, path, &config);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

/// `RUST_LOG` overrides the default `info` level. The TUI owns the terminal,
/// so it only logs when given a file.
fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();

    if let Some(path) = &cli.log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !cli.print {
        return Ok(());
    }

    builder.init();
    Ok(())
}

/// Settings from `path`, which must exist, or from the default location
/// when present.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            log::info!("Config path: {}", path.display());
            Config::load_from_path(path)?
                .with_context(|| format!("Config file {} does not exist", path.display()))
        }
        None => {
            log::info!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Save the default settings without overwriting an existing file.
fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() {
        anyhow::bail!("Config file {} already exists", target.display());
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    log::info!("Wrote default config to {}", target.display());
    Ok(target)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let (_, rows) = terminal::size()?;
        let text_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        if usize::from(text_rows) != app.height {
            app.resize(usize::from(text_rows));
        }

        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Err(err) = app.handle_key(key) {
                    log::warn!("{err:#}");
                    app.status = format!("{err:#}");
                }
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some((row, column)) = text_cell(mouse.row, mouse.column, app.height) {
                    app.click(row, column);
                }
            }
            _ => {}
        }
    }
}

/// Row and column inside the bordered text area for a screen cell, or `None`
/// on the border and the help line.
fn text_cell(row: u16, column: u16, height: usize) -> Option<(usize, usize)> {
    let row = usize::from(row.checked_sub(1)?);
    let column = usize::from(column.checked_sub(1)?);
    (row < height).then_some((row, column))
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let text = app.text();
    let lines = render::line_spans(&text);
    let masks = app.session.masks();
    let styles = render::style_spans(&app.session.document().syntax());
    let selection = app.session.primary().span();

    let content: Vec<Line> = lines
        .iter()
        .skip(app.scroll)
        .take(app.height)
        .map(|line| {
            let spans = render::styled_segments(*line, masks, &styles)
                .into_iter()
                .flat_map(|(segment, style)| {
                    split_at_selection(segment, selection)
                        .into_iter()
                        .map(move |(part, selected)| (part, style, selected))
                })
                .map(|(segment, style, selected)| {
                    let style = if selected {
                        style.add_modifier(Modifier::REVERSED)
                    } else {
                        style
                    };
                    TextSpan::styled(render::display_text(&text, segment), style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    let name = app
        .path
        .file_name()
        .map_or_else(|| app.path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let title = if app.dirty { format!("{name} *") } else { name };

    let editor = Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(editor, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        TextSpan::styled(app.status.as_str(), Style::default().fg(Color::Yellow)),
        TextSpan::raw(" | arrows move, shift selects | Ctrl-S save | Esc quit"),
    ]));
    f.render_widget(help, chunks[1]);

    let caret = app.caret();
    let caret_line = render::line_of(&lines, caret);
    if let Some(row) = caret_line.checked_sub(app.scroll)
        && row < app.height
    {
        let column = render::display_column(&text, lines[caret_line], caret, masks);
        let x = chunks[0].x + 1 + column.min(u16::MAX as usize) as u16;
        let y = chunks[0].y + 1 + row as u16;
        f.set_cursor_position((x, y));
    }
}

/// Split `segment` into the parts inside and outside `selection`.
fn split_at_selection(segment: Span, selection: Span) -> Vec<(Span, bool)> {
    if selection.is_empty() || !segment.intersects(selection) {
        return vec![(segment, false)];
    }
    let inner = Span::new(
        segment.start.max(selection.start),
        segment.end.min(selection.end),
    );
    [
        (Span::new(segment.start, inner.start), false),
        (inner, true),
        (Span::new(inner.end, segment.end), false),
    ]
    .into_iter()
    .filter(|(span, _)| !span.is_empty())
    .collect()
}
