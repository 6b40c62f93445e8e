//! TCP accept loop and per-connection protocol handling.
//!
//! Thread safety: the board is guarded by a single mutex, and each command
//! acquires it once for both the mutation and the render that answers it,
//! so every reply is a consistent snapshot. The lock is never held across
//! socket I/O. The player count is an atomic, read once per connection at
//! greeting time.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::board::Board;
use crate::protocol::{Command, HELP_TEXT};

/// What the dispatcher decided to send back, and whether to hang up.
enum Reply {
    /// One or more lines; the writer appends the final newline.
    Message(String),
    /// A mine went off: send `BOOM!`, then disconnect unless debugging.
    Boom,
    /// Client said goodbye: no reply, close the connection.
    Bye,
}

/// Multiplayer Minesweeper server: one shared board, any number of
/// concurrently connected clients.
pub struct MinesweeperServer {
    listener: TcpListener,
    board: Arc<Mutex<Board>>,
    players: Arc<AtomicUsize>,
    debug: bool,
}

impl MinesweeperServer {
    /// Bind the listening socket. Failure here is fatal to startup.
    pub async fn bind<A: ToSocketAddrs>(
        addr: A,
        board: Board,
        debug: bool,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(MinesweeperServer {
            listener,
            board: Arc::new(Mutex::new(board)),
            players: Arc::new(AtomicUsize::new(0)),
            debug,
        })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients forever, spawning one task per connection.
    /// Per-connection failures are logged and absorbed; only a failure of
    /// the listening socket itself returns.
    pub async fn serve(self) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            let board = Arc::clone(&self.board);
            let players = Arc::clone(&self.players);
            let debug = self.debug;
            tokio::spawn(async move {
                let player_count = players.fetch_add(1, Ordering::SeqCst) + 1;
                info!("client {} connected ({} online)", addr, player_count);
                if let Err(e) = handle_connection(stream, &board, player_count, debug).await {
                    warn!("client {}: {}", addr, e);
                }
                players.fetch_sub(1, Ordering::SeqCst);
                info!("client {} disconnected", addr);
            });
        }
    }
}

/// Per-client loop: greeting, then read a line, dispatch it, write the
/// reply, until EOF, `bye`, or a detonation outside debug mode.
async fn handle_connection(
    stream: TcpStream,
    board: &Mutex<Board>,
    player_count: usize,
    debug: bool,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let greeting = {
        let board = board.lock().unwrap();
        format!(
            "Welcome to Minesweeper. Players: {} Board: {} columns by {} rows. Type 'help' for help.",
            player_count,
            board.width(),
            board.height()
        )
    };
    send_line(&mut write_half, &greeting).await?;

    while let Some(line) = lines.next_line().await? {
        match dispatch(board, &line) {
            Reply::Message(reply) => send_line(&mut write_half, &reply).await?,
            Reply::Boom => {
                send_line(&mut write_half, "BOOM!").await?;
                if !debug {
                    break;
                }
            }
            Reply::Bye => break,
        }
    }
    Ok(())
}

/// Handle one client line under the board monitor.
fn dispatch(board: &Mutex<Board>, line: &str) -> Reply {
    let Some(command) = Command::parse(line) else {
        return Reply::Message(HELP_TEXT.to_string());
    };
    let mut board = board.lock().unwrap();
    match command {
        Command::Look => Reply::Message(board_message(&board)),
        Command::Help => Reply::Message(HELP_TEXT.to_string()),
        Command::Bye => Reply::Bye,
        Command::Dig { x, y } => {
            if board.dig(x, y) {
                Reply::Boom
            } else {
                Reply::Message(board_message(&board))
            }
        }
        Command::Flag { x, y } => {
            board.flag(x, y);
            Reply::Message(board_message(&board))
        }
        Command::Deflag { x, y } => {
            board.deflag(x, y);
            Reply::Message(board_message(&board))
        }
    }
}

fn board_message(board: &Board) -> String {
    board.render().join("\n")
}

async fn send_line(writer: &mut OwnedWriteHalf, message: &str) -> std::io::Result<()> {
    writer.write_all(message.as_bytes()).await?;
    writer.write_all(b"\n").await
}
