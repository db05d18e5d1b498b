use anyhow::Context;
use minesweeper_ai::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::thread;
use std::time::Duration;

/// Usage: minesweeper-ai [height] [width] [mines] [seed]
fn main() -> anyhow::Result<()> {
    // --- 1. Initialization ---
    let args: Vec<String> = std::env::args().skip(1).collect();
    let height = parse_arg(&args, 0, "height")?.unwrap_or(10);
    let width = parse_arg(&args, 1, "width")?.unwrap_or(10);
    let mines = parse_arg(&args, 2, "mines")?.unwrap_or(15);
    let mut rng = match parse_arg(&args, 3, "seed")? {
        Some(seed) => StdRng::seed_from_u64(seed as u64),
        None => StdRng::from_os_rng(),
    };

    let board = Board::new(height, width);
    let start = Point::new(height / 2, width / 2);
    let config = SolverConfig::default().with_total_mines(mines);
    let mut session = Session::new(board, mines, config, start, &mut rng)?;

    println!("--- Autonomous Minesweeper Bot ---");
    println!("Strategy: flag certain mines, reveal certain safes, guess the least risky cell otherwise.");
    println!("Opened at {start}:");
    print_board(&session.game);
    thread::sleep(Duration::from_secs(1));

    // --- 2. Game Loop ---
    let mut move_count = 0;
    while session.game.game_state == GameState::Playing {
        move_count += 1;
        println!("\n--- Move #{} ---", move_count);

        // --- 3. Bot's Decision and Execution ---
        let Some(next) = session.step(&mut rng)? else {
            println!("No moves left for the bot to make.");
            break;
        };

        match (next.action, next.certain) {
            (Action::Flag, _) => println!("Logic proved {} is a mine. Flagging.", next.cell),
            (Action::Reveal, true) => println!("Logic proved {} is safe. Revealing.", next.cell),
            (Action::Reveal, false) => println!("No certain move. Guessing {}...", next.cell),
        }
        println!("Knowledge: {}", session.ai.summary());
        print_board(&session.game);

        // Add a delay to make the game watchable
        thread::sleep(Duration::from_millis(300));
    }

    // --- 4. Final Result ---
    println!("\n--- Game Over ---");

    match session.game.game_state {
        GameState::Won => println!("Result: The bot won!"),
        GameState::Lost => println!("Result: The bot hit a mine and lost."),
        GameState::Playing => println!("Result: The game ended unexpectedly."),
    }
    Ok(())
}

fn parse_arg(args: &[String], index: usize, name: &str) -> anyhow::Result<Option<usize>> {
    args.get(index)
        .map(|raw| raw.parse().with_context(|| format!("invalid {name}: {raw}")))
        .transpose()
}

fn print_board(game: &Game) {
    let (_, width) = game.board.dimensions();

    // Print header
    print!("   ");
    for col in 0..width {
        print!("{:^3}", col);
    }
    println!("\n  +{}", "---".repeat(width));

    // Print rows
    for (row, tiles) in game.tiles.iter().enumerate() {
        print!("{:^2}|", row);
        for tile in tiles {
            let display = match tile {
                Tile::Hidden => " ■ ".to_string(),
                Tile::Flagged => " F ".to_string(),
                Tile::Revealed(0) => " 0 ".to_string(),
                Tile::Revealed(n) => format!(" {} ", n),
            };
            print!("{}", display);
        }
        println!();
    }
    println!();
}
