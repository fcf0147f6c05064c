use std::io::{self, BufRead, Write};

use anyhow::Result;
use minestomper_core::{CellValue, CellView, Coord, Coord2, GameStatus, Session};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;

    match verb {
        "q" | "quit" => parts.next().is_none().then_some(Command::Quit),
        "r" | "reveal" | "f" | "flag" => {
            let x: Coord = parts.next()?.parse().ok()?;
            let y: Coord = parts.next()?.parse().ok()?;
            if parts.next().is_some() {
                return None;
            }
            Some(match verb {
                "f" | "flag" => Command::Flag((x, y)),
                _ => Command::Reveal((x, y)),
            })
        }
        _ => None,
    }
}

/// Interaction loop for one session. Returns the session (terminal or
/// abandoned) so the caller can record statistics.
pub fn run(input: &mut impl BufRead, mut session: Session) -> Result<Session> {
    println!();
    println!("Commands: r X Y (reveal), f X Y (flag), q (give up)");

    while !session.is_over() {
        render(&session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // end of input counts as giving up
            break;
        }

        let Some(command) = parse_command(line.trim()) else {
            println!("Commands are: r X Y, f X Y, q");
            continue;
        };

        let (width, height) = session.size();
        match command {
            Command::Quit => break,
            Command::Reveal((x, y)) | Command::Flag((x, y)) if x >= width || y >= height => {
                println!(
                    "Coordinates must be 0..{} for X and 0..{} for Y.",
                    width, height
                );
            }
            Command::Reveal(coords) => {
                if !session.reveal(coords)?.has_update() {
                    println!("Nothing to reveal there.");
                }
            }
            Command::Flag(coords) => {
                if !session.toggle_flag(coords)?.has_update() {
                    println!("Cannot flag a revealed cell.");
                }
            }
        }

        debug_assert_eq!(session.check_win(), session.status() == GameStatus::Won);
    }

    match session.status() {
        GameStatus::Won => {
            render_resolved(&session);
            println!("You won in {} seconds!", session.duration_secs());
        }
        GameStatus::Lost => {
            render_resolved(&session);
            println!("Boom! Lost after {} seconds.", session.duration_secs());
        }
        GameStatus::InProgress => println!("Game abandoned."),
    }

    Ok(session)
}

fn render(session: &Session) {
    let (width, height) = session.size();

    println!();
    println!(
        "Mines left: {}   Time: {}s",
        session.mines_left(),
        session.elapsed_secs()
    );

    print_column_header(width);
    for y in 0..height {
        print!("{y:3} ");
        for x in 0..width {
            let glyph = session.cell_view((x, y)).map(view_glyph).unwrap_or('?');
            print!("{glyph}");
        }
        println!();
    }
}

/// Full board after the game ended: every mine is shown, the triggered one
/// highlighted.
fn render_resolved(session: &Session) {
    let (width, height) = session.size();

    println!();
    print_column_header(width);
    for y in 0..height {
        print!("{y:3} ");
        for x in 0..width {
            print!("{}", resolved_glyph(session, (x, y)));
        }
        println!();
    }
}

fn print_column_header(width: Coord) {
    print!("    ");
    for x in 0..width {
        print!("{}", x % 10);
    }
    println!();
}

fn view_glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Revealed(CellValue::Mine) => '*',
        CellView::Revealed(CellValue::Clue(0)) => ' ',
        CellView::Revealed(CellValue::Clue(count)) => {
            char::from_digit(count.into(), 10).unwrap_or('?')
        }
    }
}

fn resolved_glyph(session: &Session, coords: Coord2) -> char {
    if session.triggered_mine() == Some(coords) {
        '!'
    } else if session.is_mine_at(coords) {
        '*'
    } else {
        session.cell_view(coords).map(view_glyph).unwrap_or('?')
    }
}
