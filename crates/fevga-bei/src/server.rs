//! The BEI TCP server: line-oriented, one thread per connection.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use fevga_core::Player;
use fevga_engine::{analyze, choose_doubles, Analysis};

use crate::command::{parse_command, Command};
use crate::error::BeiError;
use crate::event::Event;

/// Serves the BEI protocol. Connections are independent; no state
/// survives a disconnect.
pub struct BeiServer;

impl BeiServer {
    pub fn new() -> BeiServer {
        BeiServer
    }

    /// Bind `address` and serve connections until the process exits.
    pub fn listen(&self, address: &str) -> Result<(), BeiError> {
        let listener = TcpListener::bind(address)?;
        info!(%address, "listening for BEI connections");
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    thread::spawn(move || {
                        if let Err(error) = handle_connection(stream) {
                            warn!(%error, "closing connection");
                        }
                    });
                }
                Err(error) => warn!(%error, "failed to accept connection"),
            }
        }
        Ok(())
    }
}

impl Default for BeiServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve one client: require the `bei` handshake, then answer `move`
/// and `choose` commands until the client disconnects or errs.
fn handle_connection(stream: TcpStream) -> Result<(), BeiError> {
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let mut greeted = false;
    // Reused across requests on this connection.
    let mut results: Vec<Analysis> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = parse_command(&line)?;
        if !greeted && !matches!(command, Command::Handshake) {
            return Err(BeiError::MissingHandshake { received: line });
        }
        match command {
            Command::Handshake => {
                write_event(&mut writer, &Event::ok_bei())?;
                greeted = true;
            }
            Command::Move(board) => {
                debug!(board = %board, "move requested");
                let started = Instant::now();
                let (plays, _) = board.available(Player::One);
                analyze(&board, &plays, false, &mut results);
                debug!(
                    candidates = results.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "analysis finished"
                );
                let moves = results
                    .first()
                    .map(|best| {
                        best.play
                            .moves()
                            .iter()
                            .map(|m| (m.from() as u8, m.to() as u8))
                            .collect()
                    })
                    .unwrap_or_default();
                write_event(&mut writer, &Event::OkMove { moves })?;
            }
            Command::Choose(board) => {
                debug!(board = %board, "choose requested");
                let roll = choose_doubles(&board);
                write_event(&mut writer, &Event::OkChoose { roll })?;
            }
        }
    }
    Ok(())
}

fn write_event(writer: &mut TcpStream, event: &Event) -> Result<(), BeiError> {
    let mut line = event.encode()?;
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    Ok(())
}
