//! Hot-seat Chain Reaction in the terminal.
//!
//! Reads `row col` pairs from stdin, one move per line, and prints the board
//! after every move. With `--frames` every cascade frame is printed too.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chain_reaction::{Engine, GameConfig, MoveError, Phase, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "chain-reaction", about = "Play Chain Reaction in the terminal")]
struct Args {
    /// Board height.
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Board width.
    #[arg(long, default_value_t = 5)]
    cols: usize,

    /// Number of players (2-8).
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Print every intermediate cascade frame, not just the settled board.
    #[arg(long)]
    frames: bool,
}

fn print_frame(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out, "{}", snapshot.board)
}

fn print_scores(out: &mut impl Write, engine: &Engine) -> io::Result<()> {
    let orbs = engine.state().board.orbs_by_player(engine.config().player_count);
    let scores: Vec<String> = orbs
        .iter()
        .map(|(player, count)| format!("{}: {}", player.letter(), count))
        .collect();
    writeln!(out, "{}  ({} orbs)", scores.join("  "), orbs.total())
}

fn parse_move(line: &str) -> Result<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected `row col`, got {:?}", line);
    };
    let row = row.parse().with_context(|| format!("bad row {:?}", row))?;
    let col = col.parse().with_context(|| format!("bad column {:?}", col))?;
    Ok((row, col))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = GameConfig::new(args.rows, args.cols).with_players(args.players);
    let mut engine = Engine::new(config).context("invalid game configuration")?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    write!(out, "{}", engine.state().board)?;

    loop {
        let player = match engine.phase() {
            Phase::AwaitingMove(player) => player,
            Phase::GameOver(winner) => {
                writeln!(out, "{} ({}) wins!", winner, winner.letter())?;
                return Ok(());
            }
        };
        write!(out, "{} ({}) > ", player, player.letter())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "q" || line == "quit" {
            return Ok(());
        }

        let (row, col) = match parse_move(line) {
            Ok(coord) => coord,
            Err(err) => {
                writeln!(out, "{:#}", err)?;
                continue;
            }
        };

        match engine.place_orb(row, col) {
            Ok(outcome) => {
                if args.frames {
                    for snapshot in &outcome.snapshots {
                        print_frame(&mut out, snapshot)?;
                    }
                } else {
                    write!(out, "{}", engine.state().board)?;
                }
                print_scores(&mut out, &engine)?;
            }
            Err(err @ MoveError::CascadeOverflow { .. }) => return Err(err.into()),
            Err(err) => writeln!(out, "{}", err)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("2 3").unwrap(), (2, 3));
        assert_eq!(parse_move("  0   4 ").unwrap(), (0, 4));
        assert!(parse_move("1").is_err());
        assert!(parse_move("1 2 3").is_err());
        assert!(parse_move("a 2").is_err());
    }
}
