//! Byte protocol spoken between the referee and each agent.
//!
//! Every agent has two one-way streams: commands flow from the referee,
//! played cards flow back. Before the first command the referee writes the
//! agent's hand as [`HAND_SIZE`] consecutive card records.
//!
//! | byte | payload     | reply       |
//! |------|-------------|-------------|
//! | `L`  | none        | card record |
//! | `F`  | card record | card record |
//! | `X`  | none        | none        |

mod wire;

pub use wire::{CARD_RECORD_LEN, decode_card, encode_card, read_card, write_card};

use crate::HAND_SIZE;
use crate::model::card::Card;
use std::io::{self, Read, Write};
use thiserror::Error;

pub const LEAD: u8 = b'L';
pub const FOLLOW: u8 = b'F';
pub const TERMINATE: u8 = b'X';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lead,
    /// Carries the card that was led; only its suit matters to the follower.
    Follow(Card),
    Terminate,
}

impl Command {
    pub const fn tag(self) -> u8 {
        match self {
            Command::Lead => LEAD,
            Command::Follow(_) => FOLLOW,
            Command::Terminate => TERMINATE,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("stream closed before the expected message arrived")]
    Closed,
    #[error("invalid rank {0} in card record")]
    InvalidRank(i32),
    #[error("invalid suit byte {0:#04x} in card record")]
    InvalidSuit(u8),
    #[error("unknown command byte {0:#04x}")]
    UnknownCommand(u8),
    #[error("a hand must hold 16 cards, got {0}")]
    HandSize(usize),
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => ProtocolError::Closed,
            _ => ProtocolError::Io(err),
        }
    }
}

pub fn write_command<W: Write + ?Sized>(
    writer: &mut W,
    command: Command,
) -> Result<(), ProtocolError> {
    match command {
        Command::Follow(card) => {
            let mut frame = [0u8; 1 + CARD_RECORD_LEN];
            frame[0] = FOLLOW;
            frame[1..].copy_from_slice(&encode_card(card));
            writer.write_all(&frame)?;
        }
        other => writer.write_all(&[other.tag()])?,
    }
    writer.flush()?;
    Ok(())
}

pub fn read_command<R: Read + ?Sized>(reader: &mut R) -> Result<Command, ProtocolError> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    match tag[0] {
        LEAD => Ok(Command::Lead),
        FOLLOW => read_card(&mut *reader).map(Command::Follow),
        TERMINATE => Ok(Command::Terminate),
        other => Err(ProtocolError::UnknownCommand(other)),
    }
}

/// Sends a freshly dealt hand as one contiguous block of records.
pub fn write_hand<W: Write + ?Sized>(writer: &mut W, cards: &[Card]) -> Result<(), ProtocolError> {
    if cards.len() != HAND_SIZE {
        return Err(ProtocolError::HandSize(cards.len()));
    }
    let mut block = Vec::with_capacity(HAND_SIZE * CARD_RECORD_LEN);
    for card in cards {
        block.extend_from_slice(&encode_card(*card));
    }
    writer.write_all(&block)?;
    writer.flush()?;
    Ok(())
}

pub fn read_hand<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<Card>, ProtocolError> {
    (0..HAND_SIZE).map(|_| read_card(&mut *reader)).collect()
}
