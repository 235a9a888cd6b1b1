mod ui;

use loot_tower::leaderboard::{JsonFileStore, LeaderboardEntry, LeaderboardStore};
use loot_tower::utils::version_line;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    seed: Option<u64>,
    leaderboard: Option<PathBuf>,
    scores: bool,
    version: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--leaderboard" => {
                let path = args.next().ok_or("--leaderboard needs a path")?;
                options.leaderboard = Some(PathBuf::from(path));
            }
            "--scores" => options.scores = true,
            "--version" | "-v" => options.version = true,
            "--help" | "-h" => options.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn print_help() {
    println!("Loot Tower - climb, loot, die, repeat\n");
    println!("Usage: loot-tower [options]\n");
    println!("Options:");
    println!("  --seed <n>          Play a reproducible run");
    println!("  --leaderboard <p>   Use a different leaderboard file");
    println!("  --scores            Print the leaderboard and exit");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
    println!("\nSet RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.");
}

fn print_scores(board: &[LeaderboardEntry]) {
    if board.is_empty() {
        println!("No runs recorded yet.");
        return;
    }
    println!("{:<4}{:<22}{:<10}{:>6}", "#", "Name", "Role", "Gold");
    for (rank, entry) in board.iter().enumerate() {
        println!(
            "{:<4}{:<22}{:<10}{:>6}",
            rank + 1,
            entry.name,
            entry.role,
            entry.gold
        );
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'loot-tower --help' for usage.");
            std::process::exit(1);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }
    if options.version {
        println!("{}", version_line());
        return Ok(());
    }

    init_tracing();

    let store = match options.leaderboard {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location()?,
    };
    if options.scores {
        print_scores(&store.load());
        return Ok(());
    }

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::debug!(seed = ?options.seed, path = %store.path().display(), "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(ui::play(rng, store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_plays() {
        assert_eq!(parse_args(&[]), Ok(Options::default()));
    }

    #[test]
    fn test_seed_and_leaderboard() {
        let options = parse_args(&args(&["--seed", "42", "--leaderboard", "/tmp/b.json"])).unwrap();
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.leaderboard, Some(PathBuf::from("/tmp/b.json")));
        assert!(!options.scores);
    }

    #[test]
    fn test_flags() {
        let options = parse_args(&args(&["--scores", "-v"])).unwrap();
        assert!(options.scores);
        assert!(options.version);
        assert!(parse_args(&args(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_bad_args_are_rejected() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--fly"])).is_err());
    }
}
