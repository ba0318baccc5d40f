//! Command-line interface for the quadra engine
//!
//! ## Commands
//!
//! - `demo`: run a few scripted positions and print the engine's choices
//! - `search`: answer a JSON search request (file or stdin) with a JSON
//!   reply on stdout

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use quadra::board::Posture;
use quadra::{Board, Color, Piece, Pos, SearchConfig, SearchEngine, SearchRequest};

#[derive(Parser)]
#[command(name = "quadra")]
#[command(version, about = "AI engine for a four-player territorial board game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scripted demo positions
    Demo(DemoArgs),

    /// Answer a single JSON search request
    Search(SearchArgs),
}

#[derive(Args)]
struct DemoArgs {
    /// Time budget per position in milliseconds
    #[arg(long, default_value_t = 500)]
    time_ms: u64,

    /// Worker pool size (defaults to the number of logical cores)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args)]
struct SearchArgs {
    /// Path to a JSON request, or '-' for stdin
    #[arg(long, default_value = "-")]
    request: PathBuf,

    /// Override the request's time budget in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Worker pool size (defaults to the number of logical cores)
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.verbose);

    match cli.command {
        Commands::Demo(args) => run_demo(&args),
        Commands::Search(args) => run_search(&args),
    }
}

fn initialize_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("quadra=debug,info")
    } else {
        EnvFilter::new("quadra=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn make_engine(threads: Option<usize>) -> SearchEngine {
    match threads {
        Some(n) => SearchEngine::with_pool_size(n),
        None => SearchEngine::new(),
    }
}

fn run_search(args: &SearchArgs) -> anyhow::Result<()> {
    let raw = if args.request.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading request from stdin")?;
        buffer
    } else {
        fs::read_to_string(&args.request)
            .with_context(|| format!("reading {}", args.request.display()))?
    };

    let mut request: SearchRequest =
        serde_json::from_str(&raw).context("parsing the search request")?;
    if let Some(ms) = args.time_ms {
        request.config.ai_search_time_ms = ms;
    }

    let mut engine = make_engine(args.threads);
    let reply = engine.search(&request)?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

fn run_demo(args: &DemoArgs) -> anyhow::Result<()> {
    let mut engine = make_engine(args.threads);
    println!("quadra demo — {} workers\n", engine.pool_size());

    demo_opening(&mut engine, args.time_ms)?;
    demo_conversion(&mut engine, args.time_ms)?;
    demo_finish_the_span(&mut engine, args.time_ms)?;
    Ok(())
}

fn demo_request(board: Board, player_index: usize, turn_count: u32, time_ms: u64) -> SearchRequest {
    SearchRequest {
        board,
        player_index,
        turn_count,
        config: SearchConfig::default().with_time_ms(time_ms),
    }
}

fn demo_opening(engine: &mut SearchEngine, time_ms: u64) -> anyhow::Result<()> {
    println!("--- Opening: empty board, A to move ---");
    let request = demo_request(Board::new(11), 0, 1, time_ms);
    let reply = engine.search(&request)?;
    print_reply(&reply);
    Ok(())
}

fn demo_conversion(engine: &mut SearchEngine, time_ms: u64) -> anyhow::Result<()> {
    println!("--- Conversion: a flankable B piece ---");
    let mut board = Board::new(11);
    board.set(Pos::new(5, 3), Piece::new(Color::A, Posture::Old));
    board.set(Pos::new(5, 4), Piece::new(Color::B, Posture::Old));
    board.set(Pos::new(7, 7), Piece::new(Color::D, Posture::Old));
    print!("{board}");

    let request = demo_request(board, 0, 5, time_ms);
    let reply = engine.search(&request)?;
    print_reply(&reply);
    Ok(())
}

fn demo_finish_the_span(engine: &mut SearchEngine, time_ms: u64) -> anyhow::Result<()> {
    println!("--- One placement away from a spanning win ---");
    let mut board = Board::new(11);
    for row in 0..10 {
        board.set(Pos::new(row, 5), Piece::new(Color::A, Posture::Old));
    }
    print!("{board}");

    let request = demo_request(board, 0, 1, time_ms);
    let reply = engine.search(&request)?;
    print_reply(&reply);
    Ok(())
}

fn print_reply(reply: &quadra::SearchReply) {
    match &reply.best_move {
        Some(mv) => {
            let cells: Vec<String> = mv
                .placements
                .iter()
                .map(|p| format!("({},{})", p.row, p.col))
                .collect();
            println!(
                "best move: {} | score {} | depth {} | {} nodes | {} ms\n",
                cells.join(" "),
                reply.score,
                reply.depth,
                reply.nodes,
                reply.elapsed_ms
            );
        }
        None => println!("no legal move\n"),
    }
}
