use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use minestomper_core::{GameConfig, RandomBoardGenerator, Session, StatsHistory};

use crate::play;

/// Menu loop: create sessions, show the accumulated statistics, quit.
/// Statistics live only as long as the process.
pub fn run(input: &mut impl BufRead, forced_seed: Option<u64>) -> Result<()> {
    let mut history = StatsHistory::new();

    loop {
        println!();
        println!("--- Minestomper ---");
        println!("1. New Game");
        println!("2. View Statistics");
        println!("3. Quit");

        let Some(choice) = prompt(input, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(config) = read_config(input)? else {
                    return Ok(());
                };
                let seed = forced_seed.unwrap_or_else(seed_from_clock);
                let session = Session::generate(config, RandomBoardGenerator::new(seed));
                let session = play::run(input, session)?;
                history.record(&session);
            }
            "2" => print_statistics(&history),
            "3" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/// Prompts for width, height, and mine count until the combination passes
/// engine validation. Bad numbers and impossible configurations re-prompt
/// instead of crashing.
fn read_config(input: &mut impl BufRead) -> Result<Option<GameConfig>> {
    loop {
        let Some(width) = read_number(input, "Enter field width: ")? else {
            return Ok(None);
        };
        let Some(height) = read_number(input, "Enter field height: ")? else {
            return Ok(None);
        };
        let Some(mines) = read_number(input, "Enter number of mines: ")? else {
            return Ok(None);
        };

        match GameConfig::new((width, height), mines) {
            Ok(config) => return Ok(Some(config)),
            Err(err) => println!("{err}"),
        }
    }
}

fn read_number<T: FromStr>(input: &mut impl BufRead, text: &str) -> Result<Option<T>> {
    loop {
        let Some(line) = prompt(input, text)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Reads one trimmed line, `None` on end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn seed_from_clock() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

fn print_statistics(history: &StatsHistory) {
    println!();
    println!("--- Game Statistics ---");

    if history.is_empty() {
        println!("No games played yet.");
        return;
    }

    for record in history.iter() {
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(err) => log::error!("could not render record: {err}"),
        }
    }
}
