use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use minesweeper::{
    init_logging, load_file, random_board, MinesweeperServer, DEFAULT_PORT, DEFAULT_SIZE,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keep clients connected after they dig up a mine.
    #[arg(long, overrides_with = "no_debug")]
    debug: bool,

    /// Disconnect clients after they dig up a mine (the default).
    #[arg(long, overrides_with = "debug")]
    no_debug: bool,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Start with a random board of the given size, e.g. --size 42,58.
    #[arg(long, value_name = "SIZE_X,SIZE_Y", value_parser = parse_size, conflicts_with = "file")]
    size: Option<(usize, usize)>,

    /// Start with the board stored in the given file.
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

fn parse_size(arg: &str) -> Result<(usize, usize), String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected SIZE_X,SIZE_Y, got '{arg}'"))?;
    let x = x.parse().map_err(|_| format!("invalid size '{x}'"))?;
    let y = y.parse().map_err(|_| format!("invalid size '{y}'"))?;
    if x == 0 || y == 0 {
        return Err("board dimensions must be positive".to_string());
    }
    Ok((x, y))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let board = match (&cli.file, cli.size) {
        (Some(path), _) => load_file(path)
            .with_context(|| format!("failed to load board file {}", path.display()))?,
        (None, Some((width, height))) => random_board(&mut rand::rng(), width, height),
        (None, None) => random_board(&mut rand::rng(), DEFAULT_SIZE, DEFAULT_SIZE),
    };

    let server = MinesweeperServer::bind(("0.0.0.0", cli.port), board, cli.debug)
        .await
        .with_context(|| format!("failed to bind port {}", cli.port))?;
    info!("listening on {}", server.local_addr()?);
    server.serve().await
}
