//! # Message Appendix
//!
//! The prunable message attached to a transaction, in one of two variants.
//!
//! ## Wire Format
//!
//! ```text
//! [ u32 LE: length | TEXT_FLAG ][ body ]
//!
//! plain:     body = length bytes of message
//! encrypted: body = EncryptedPayload (length bytes of ciphertext + 32-byte nonce)
//! ```
//!
//! The high bit of the length word carries `is_text`. Declared lengths are
//! bounded before any body byte is read.

use crate::domain::entities::MessagePayload;
use crate::domain::errors::PrunableError;
use shared_crypto::EncryptedPayload;

/// High bit of the length word: content is text.
pub const TEXT_FLAG: u32 = 0x8000_0000;

const LENGTH_PREFIX_SIZE: usize = 4;

/// Largest length the length word can carry beside the text flag.
pub const MAX_LENGTH_WORD: usize = (TEXT_FLAG - 1) as usize;

/// A message appendix carried by a transaction.
///
/// The appendix is stored as-is, so it shares the payload type of
/// `PrunableMessage`.
pub type PrunableAppendix = MessagePayload;

impl MessagePayload {
    /// Parse a plain-message appendix body.
    pub fn parse_plain(buf: &mut &[u8], max_length: usize) -> Result<Self, PrunableError> {
        let (length, is_text) = read_length_prefix(buf)?;
        if length > max_length {
            return Err(PrunableError::AppendixTooLong {
                length,
                max: max_length,
            });
        }
        if buf.len() < length {
            return Err(PrunableError::AppendixTruncated {
                needed: length,
                available: buf.len(),
            });
        }
        let (message, rest) = buf.split_at(length);
        let appendix = MessagePayload::Plain {
            message: message.to_vec(),
            is_text,
        };
        *buf = rest;
        Ok(appendix)
    }

    /// Parse an encrypted-message appendix body.
    ///
    /// `max_length` bounds the declared ciphertext length.
    pub fn parse_encrypted(buf: &mut &[u8], max_length: usize) -> Result<Self, PrunableError> {
        let (length, is_text) = read_length_prefix(buf)?;
        let payload = EncryptedPayload::read_from(buf, length, max_length)?;
        Ok(MessagePayload::Encrypted { payload, is_text })
    }

    /// Serialize the appendix body.
    ///
    /// # Errors
    ///
    /// `AppendixTooLong` when the length does not fit beside the text flag.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrunableError> {
        let (length, body) = match self {
            MessagePayload::Plain { message, .. } => (message.len(), message.clone()),
            MessagePayload::Encrypted { payload, .. } => {
                (payload.ciphertext().len(), payload.to_bytes())
            }
        };
        let word = length_word(length, self.is_text())?;

        let mut out = Vec::with_capacity(LENGTH_PREFIX_SIZE + body.len());
        out.extend_from_slice(&word.to_le_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }
}

fn length_word(length: usize, is_text: bool) -> Result<u32, PrunableError> {
    if length > MAX_LENGTH_WORD {
        return Err(PrunableError::AppendixTooLong {
            length,
            max: MAX_LENGTH_WORD,
        });
    }
    let word = length as u32;
    Ok(if is_text { word | TEXT_FLAG } else { word })
}

fn read_length_prefix(buf: &mut &[u8]) -> Result<(usize, bool), PrunableError> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return Err(PrunableError::AppendixTruncated {
            needed: LENGTH_PREFIX_SIZE,
            available: buf.len(),
        });
    }
    let (prefix, rest) = buf.split_at(LENGTH_PREFIX_SIZE);
    let mut word = [0u8; LENGTH_PREFIX_SIZE];
    word.copy_from_slice(prefix);
    let word = u32::from_le_bytes(word);
    *buf = rest;

    Ok(((word & !TEXT_FLAG) as usize, word & TEXT_FLAG != 0))
}
