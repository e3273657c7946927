use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use pegs_and_jokers::cli::{PlayerInstance, StatisticsAccumulator, create_player, print_player_help};
use pegs_and_jokers::game::{Game, GameConfig};
use pegs_and_jokers::types::{Color, NUM_PLAYERS};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser, Clone)]
#[command(name = "pegs-sim")]
#[command(about = "Pegs and Jokers simulator - play many games between player strategies")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated player codes for the four seats (e.g. F,R,R,R)
    /// Use ':' to set player-specific params (e.g. F:0.1 for epsilon)
    #[arg(long, default_value = "F,F,F,F")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Turns after which an unfinished game is abandoned
    #[arg(long, default_value_t = GameConfig::default().turn_limit)]
    turn_limit: u32,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,

    /// Log every resolved play
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Number of worker threads for parallel execution
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    init_tracing(&args);

    let player_keys: Vec<&str> = args.players.split(',').collect();
    if player_keys.len() != NUM_PLAYERS {
        eprintln!("Error: Must specify exactly {NUM_PLAYERS} players");
        std::process::exit(1);
    }

    let mut players: Vec<PlayerInstance> = Vec::new();
    for (i, key) in player_keys.iter().enumerate() {
        let parts: Vec<&str> = key.split(':').collect();
        let code = parts[0];
        let params = parts[1..].to_vec();

        match create_player(code, Color::of(i), params) {
            Some(player) => players.push(player),
            None => {
                eprintln!("Error: Unknown player code '{code}'");
                eprintln!("Use --help-players to see available codes");
                std::process::exit(1);
            }
        }
    }

    let mut stats = StatisticsAccumulator::new();
    if args.workers > 1 {
        run_parallel_simulations(&args, &mut stats);
    } else {
        run_sequential_simulations(&args, &players, &mut stats);
    }

    if args.json {
        match serde_json::to_string_pretty(&stats.stats) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: could not serialize summary: {err}");
                std::process::exit(1);
            }
        }
    } else if !args.quiet {
        print_summary(&stats, &players);
    }
}

fn config_for(args: &Args, game_idx: u64) -> GameConfig {
    GameConfig {
        seed: args.seed + game_idx,
        turn_limit: args.turn_limit,
    }
}

fn run_sequential_simulations(
    args: &Args,
    players: &[PlayerInstance],
    stats: &mut StatisticsAccumulator,
) {
    let print_games = !args.quiet && !args.json;
    for game_idx in 0..args.num {
        let start = Instant::now();
        let mut game = Game::new(config_for(args, game_idx as u64));
        let winner = game.play(players);
        let duration = start.elapsed();

        stats.after(&game, duration);

        if print_games {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let winner_str = winner
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "None".to_string());
                println!(
                    "Game {:>4}: Winner={:>6}, Turns={:>5}, Duration={:?}",
                    game_idx + 1,
                    winner_str,
                    game.state.turn,
                    duration
                );
            } else if (game_idx + 1) % 100 == 0 {
                print!(".");
                let _ = std::io::stdout().flush();
            }
        }
    }
}

fn run_parallel_simulations(args: &Args, stats: &mut StatisticsAccumulator) {
    // Seats are rebuilt per worker so seeded players stay independent.
    let keys: Vec<String> = args.players.split(',').map(str::to_string).collect();
    let args = Arc::new(args.clone());
    let games_per_worker = args.num as usize / args.workers;
    let remainder = args.num as usize % args.workers;

    let mut handles = Vec::new();
    for worker_id in 0..args.workers {
        let args = Arc::clone(&args);
        let keys = keys.clone();
        let num_games = if worker_id < remainder {
            games_per_worker + 1
        } else {
            games_per_worker
        };

        handles.push(thread::spawn(move || {
            let players: Vec<PlayerInstance> = keys
                .iter()
                .enumerate()
                .filter_map(|(i, key)| {
                    let mut parts = key.split(':');
                    let code = parts.next()?;
                    create_player(code, Color::of(i), parts.collect())
                })
                .collect();

            let mut local_stats = StatisticsAccumulator::new();
            let start_idx = worker_id * games_per_worker + worker_id.min(remainder);
            for local_idx in 0..num_games {
                let game_idx = (start_idx + local_idx) as u64;
                let start = Instant::now();
                let mut game = Game::new(config_for(&args, game_idx));
                game.play(&players);
                local_stats.after(&game, start.elapsed());
            }
            local_stats
        }));
    }

    for handle in handles {
        match handle.join() {
            Ok(worker) => stats.stats.merge(worker.stats),
            Err(_) => eprintln!("Error: a simulation worker panicked"),
        }
    }
}

fn print_summary(stats: &StatisticsAccumulator, players: &[PlayerInstance]) {
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!(
        "{:<22} {:<8} {:<10} {:<10} {:<10}",
        "Player", "Wins", "Win Rate", "Avg Home", "Discards"
    );
    println!("{}", "-".repeat(64));

    for (idx, player) in players.iter().enumerate() {
        let color = Color::of(idx);
        let wins = stats.stats.wins.get(&color).copied().unwrap_or(0);
        let win_rate = if stats.stats.games > 0 {
            (wins as f64 / stats.stats.games as f64) * 100.0
        } else {
            0.0
        };
        let discards = stats.stats.discards_by_player.get(&color).copied().unwrap_or(0);

        println!(
            "{:<22} {:<8} {:<9.1}% {:<10.2} {:<10}",
            format!("{} ({})", player.name(), color),
            wins,
            win_rate,
            stats.stats.get_avg_pegs_home(color),
            discards
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.stats.games);
    println!("  Unfinished: {}", stats.stats.unfinished);
    println!("  Avg Turns: {:.2}", stats.stats.get_avg_turns());
    println!("  Avg Ticks: {:.2}", stats.stats.get_avg_ticks());
    println!("  Avg Duration: {:.2?}", stats.stats.get_avg_duration());
}
