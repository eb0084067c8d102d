use std::collections::HashSet;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unixid::{Config, Generator, StaticSession, is_valid, parse};

#[derive(Debug, Parser)]
#[command(name = "unixid", about = "unixid - nanosecond ID generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print new IDs.
    Next {
        #[command(flatten)]
        gen_opts: GenOpts,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Check an ID against the grammar.
    Validate { id: String },
    /// Split an ID into timestamp and suffix.
    Parse {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Render the timestamp of an ID as `YYYY-MM-DD HH:MM` (UTC).
    Date { id: String },
    /// Measure generation throughput.
    Bench {
        #[command(flatten)]
        gen_opts: GenOpts,
        #[arg(long, default_value_t = 100_000)]
        count: usize,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Generate a few IDs and check ordering and round-trip.
    Selftest,
}

#[derive(Debug, Clone, Default, Args)]
struct GenOpts {
    /// Session token appended as `.SUFFIX`.
    #[arg(long, env = "UNIXID_SESSION")]
    session: Option<String>,
    /// Skip internal locking.
    #[arg(long, env = "UNIXID_SINGLE_THREADED")]
    single_threaded: bool,
}

impl GenOpts {
    fn build(&self) -> Result<Generator, String> {
        let mut config = if self.single_threaded {
            Config::single_threaded()
        } else {
            Config::server()
        };
        if let Some(session) = &self.session {
            config = config.with_session(Arc::new(StaticSession::new(session.clone())));
        }
        Generator::from_config(config).map_err(|e| e.to_string())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_next(opts: &GenOpts, count: usize) -> Result<(), String> {
    let generator = opts.build()?;
    let mut out = io::stdout().lock();
    for id in generator.ids().take(count) {
        writeln!(out, "{id}").map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

fn run_validate(id: &str) -> Result<(), String> {
    let ok = is_valid(id);
    println!("{ok}");
    if ok {
        Ok(())
    } else {
        Err("invalid id".to_string())
    }
}

fn run_parse(id: &str, json_out: bool) -> Result<(), String> {
    let parsed = parse(id).map_err(|e| e.to_string())?;
    if json_out {
        println!(
            "{}",
            serde_json::to_string(&parsed).map_err(|e| e.to_string())?
        );
    } else {
        println!("timestamp={}", parsed.timestamp);
        println!("suffix={}", parsed.suffix);
    }
    Ok(())
}

fn run_date(id: &str) -> Result<(), String> {
    let generator = Generator::new().map_err(|e| e.to_string())?;
    println!(
        "{}",
        generator.to_date_string(id).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn run_bench(opts: &GenOpts, count: usize, threads: usize) -> Result<(), String> {
    let threads = threads.max(1);
    let generator = Arc::new(opts.build()?);
    let per_thread = count.div_ceil(threads);
    debug!(count, threads, "starting bench");

    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || generator.next_n(per_thread))
        })
        .collect();

    let mut unique = HashSet::with_capacity(per_thread * threads);
    for handle in handles {
        let ids = handle
            .join()
            .map_err(|_| "bench worker panicked".to_string())?;
        unique.extend(ids);
    }
    let secs = start.elapsed().as_secs_f64().max(1e-9);
    let total = per_thread * threads;

    let payload = json!({
        "impl": "rust",
        "threads": threads,
        "n": total,
        "unique": unique.len(),
        "seconds": secs,
        "ids_per_sec": total as f64 / secs,
    });
    println!(
        "{}",
        serde_json::to_string(&payload).map_err(|e| e.to_string())?
    );

    if unique.len() == total {
        Ok(())
    } else {
        Err("bench produced duplicate ids".to_string())
    }
}

fn run_selftest() -> Result<(), String> {
    let generator = Generator::new().map_err(|e| e.to_string())?;
    let a = generator.get_new_id();
    let b = generator.get_new_id();
    if a >= b {
        return Err("selftest failed: non-monotonic".to_string());
    }
    let parsed = generator.parse(&b).map_err(|e| e.to_string())?;
    if parsed.to_string() != b {
        return Err("selftest failed: round-trip mismatch".to_string());
    }
    println!("ok");
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let res = match &cli.command {
        Command::Next { gen_opts, count } => run_next(gen_opts, *count),
        Command::Validate { id } => run_validate(id),
        Command::Parse { id, json } => run_parse(id, *json),
        Command::Date { id } => run_date(id),
        Command::Bench {
            gen_opts,
            count,
            threads,
        } => run_bench(gen_opts, *count, *threads),
        Command::Selftest => run_selftest(),
    };

    if let Err(err) = res {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_next_flags() {
        let cli = Cli::try_parse_from(["unixid", "next", "--count", "3", "--session", "42"])
            .unwrap();
        match cli.command {
            Command::Next { gen_opts, count } => {
                assert_eq!(count, 3);
                assert_eq!(gen_opts.session.as_deref(), Some("42"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_gen_opts_build_with_session() {
        let opts = GenOpts {
            session: Some("7".to_string()),
            single_threaded: true,
        };
        let generator = opts.build().unwrap();
        assert!(generator.get_new_id().ends_with(".7"));
    }

    #[test]
    fn test_run_validate_and_parse() {
        assert!(run_validate("1624397134562544800.42").is_ok());
        assert!(run_validate("1624397134562544800.42.42").is_err());
        assert!(run_parse("1624397134562544800.42", true).is_ok());
        assert!(run_parse("abc", false).is_err());
    }

    #[test]
    fn test_selftest() {
        assert!(run_selftest().is_ok());
    }
}
