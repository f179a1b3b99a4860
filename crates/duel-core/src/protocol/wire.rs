use super::ProtocolError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::io::{Read, Write};

/// Rank as a little-endian `i32`, then the ASCII suit code.
pub const CARD_RECORD_LEN: usize = 5;

pub fn encode_card(card: Card) -> [u8; CARD_RECORD_LEN] {
    let mut record = [0u8; CARD_RECORD_LEN];
    record[..4].copy_from_slice(&i32::from(card.rank.value()).to_le_bytes());
    record[4] = card.suit.code();
    record
}

pub fn decode_card(record: &[u8; CARD_RECORD_LEN]) -> Result<Card, ProtocolError> {
    let raw_rank = i32::from_le_bytes([record[0], record[1], record[2], record[3]]);
    let rank = u8::try_from(raw_rank)
        .ok()
        .and_then(Rank::from_value)
        .ok_or(ProtocolError::InvalidRank(raw_rank))?;
    let suit = Suit::from_code(record[4]).ok_or(ProtocolError::InvalidSuit(record[4]))?;
    Ok(Card::new(rank, suit))
}

pub fn write_card<W: Write + ?Sized>(writer: &mut W, card: Card) -> Result<(), ProtocolError> {
    writer.write_all(&encode_card(card))?;
    writer.flush()?;
    Ok(())
}

pub fn read_card<R: Read + ?Sized>(reader: &mut R) -> Result<Card, ProtocolError> {
    let mut record = [0u8; CARD_RECORD_LEN];
    reader.read_exact(&mut record)?;
    decode_card(&record)
}
