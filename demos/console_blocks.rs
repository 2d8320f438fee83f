use phys2d::{scenes, ShapeKind, Simulation};
use phys2d::core::ShapeView;
use phys2d::math::Vector2;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use std::thread::sleep;
use crossterm::{
    ExecutableCommand, QueueableCommand,
    event::{self, Event, KeyCode},
    terminal::{self, Clear, ClearType, size},
    cursor::{Hide, Show, MoveTo},
    style::{Color, Print, SetForegroundColor, ResetColor},
};

const FRAME_DURATION: Duration = Duration::from_millis(16); // ~60 FPS
const SIMULATION_DURATION: f64 = 60.0; // seconds
const BLOCK_CHAR: char = '■';
const WALL_CHAR: char = '#';

fn main() -> io::Result<()> {
    // `slides` for the ramps, anything else for the block pile
    let scene = std::env::args().nth(1).unwrap_or_default();
    let mut simulation = if scene == "slides" {
        let (config, spawn) = scenes::slides_config();
        scenes::slides(config, spawn)
    } else {
        let (config, spawn) = scenes::falling_blocks_config();
        scenes::falling_blocks(config, spawn)
    }
    .map_err(physics_error)?;

    let mut stdout = stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(Hide)?;

    let result = run(&mut simulation, &mut stdout);

    stdout.execute(Show)?;
    terminal::disable_raw_mode()?;
    println!();

    result
}

fn run(simulation: &mut Simulation, stdout: &mut io::Stdout) -> io::Result<()> {
    let start_time = Instant::now();

    while simulation.is_running() && start_time.elapsed().as_secs_f64() < SIMULATION_DURATION {
        let frame_start = Instant::now();

        // Quit on q or Esc
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    simulation.handle_quit();
                }
            }
        }

        simulation.advance_frame().map_err(physics_error)?;
        draw(simulation, stdout)?;

        if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
            sleep(remaining);
        }
    }

    Ok(())
}

fn draw(simulation: &Simulation, stdout: &mut io::Stdout) -> io::Result<()> {
    let (width, height) = size()?;
    let rows = height.saturating_sub(2);
    let config = simulation.config();

    // World units per terminal cell
    let scale = Vector2::new(
        config.world_width / width.max(1) as f64,
        config.world_height / rows.max(1) as f64,
    );

    stdout.queue(Clear(ClearType::All))?;

    for view in simulation.render_states() {
        match view.kind {
            ShapeKind::Segment => draw_segment(stdout, &view, scale, width, rows)?,
            ShapeKind::Polygon => {
                if let Some((x, y)) = to_cell(view.position, scale, width, rows) {
                    stdout.queue(MoveTo(x, y))?
                          .queue(SetForegroundColor(Color::Yellow))?
                          .queue(Print(BLOCK_CHAR))?
                          .queue(ResetColor)?;
                }
            }
        }
    }

    stdout.queue(MoveTo(0, rows))?
          .queue(Print(format!(
              "Frame: {}  Blocks: {}  Recycled: {}  (q to quit)",
              simulation.frame_count(),
              simulation.spawner().population(),
              simulation.spawner().recycled_total(),
          )))?;

    stdout.flush()
}

fn draw_segment(
    stdout: &mut io::Stdout,
    view: &ShapeView,
    scale: Vector2,
    width: u16,
    rows: u16,
) -> io::Result<()> {
    let (a, b) = match view.points.as_slice() {
        [a, b] => (*a, *b),
        _ => return Ok(()),
    };

    // Sample about one point per cell along the segment
    let cells = ((b.x - a.x) / scale.x).abs().max(((b.y - a.y) / scale.y).abs()).ceil() as usize;
    for i in 0..=cells {
        let t = i as f64 / cells.max(1) as f64;
        if let Some((x, y)) = to_cell(a.lerp(&b, t), scale, width, rows) {
            stdout.queue(MoveTo(x, y))?
                  .queue(SetForegroundColor(Color::Grey))?
                  .queue(Print(WALL_CHAR))?
                  .queue(ResetColor)?;
        }
    }

    Ok(())
}

/// Maps a world position to a terminal cell, if it is on screen
fn to_cell(position: Vector2, scale: Vector2, width: u16, rows: u16) -> Option<(u16, u16)> {
    let x = (position.x / scale.x).floor();
    let y = (position.y / scale.y).floor();
    if x < 0.0 || y < 0.0 || x >= width as f64 || y >= rows as f64 {
        return None;
    }
    Some((x as u16, y as u16))
}

fn physics_error(error: phys2d::error::PhysicsError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}
