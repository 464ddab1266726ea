//! Binary encoding of the memo tables
//!
//! All integers are little-endian.
//!
//! ```text
//! magic    b"WMXC"
//! version  u32
//! players  u64 count, then count x (state, rank)
//! servers  u64 count, then count x (state, word, rank)
//!
//! state    26 x (min_count u8, exact u8, excluded u8), then resolved word
//! word     5 x u8 letter code (0-25, 0xFF unknown)
//! rank     i32 (guesses, or -1 for no solution)
//! ```

use super::CheckpointError;
use crate::core::{ALPHABET, KnowledgeState, LetterFacts, WORD_LEN, Word};
use crate::solver::{Rank, Tables};
use std::io::{self, Read, Write};

/// File signature
pub const MAGIC: [u8; 4] = *b"WMXC";

/// Current format version
pub const VERSION: u32 = 1;

const STATE_BYTES: usize = ALPHABET * 3 + WORD_LEN;

/// Upper bound on entries preallocated from an untrusted count
const PREALLOCATE_LIMIT: u64 = 1 << 16;

fn encode_state(state: &KnowledgeState, out: &mut Vec<u8>) {
    for facts in state.all_facts() {
        out.extend_from_slice(&[facts.min_count, u8::from(facts.exact), facts.excluded]);
    }
    out.extend_from_slice(state.resolved().codes());
}

fn decode_state(bytes: &[u8; STATE_BYTES]) -> Result<KnowledgeState, CheckpointError> {
    let mut facts = [LetterFacts::default(); ALPHABET];
    for (f, chunk) in facts.iter_mut().zip(bytes.chunks_exact(3)) {
        f.min_count = chunk[0];
        f.exact = match chunk[1] {
            0 => false,
            1 => true,
            other => return Err(CheckpointError::Corrupt(format!("exact flag {other}"))),
        };
        f.excluded = chunk[2];
    }
    let resolved = decode_word(&bytes[ALPHABET * 3..])?;
    KnowledgeState::from_parts(facts, resolved).map_err(|e| CheckpointError::Corrupt(e.to_string()))
}

fn decode_word(bytes: &[u8]) -> Result<Word, CheckpointError> {
    let mut codes = [0u8; WORD_LEN];
    codes.copy_from_slice(bytes);
    Word::from_codes(codes).map_err(|e| CheckpointError::Corrupt(e.to_string()))
}

fn decode_rank(bytes: [u8; 4]) -> Result<Rank, CheckpointError> {
    let raw = i32::from_le_bytes(bytes);
    Rank::from_raw(raw).ok_or_else(|| CheckpointError::Corrupt(format!("rank {raw}")))
}

fn read_array<const N: usize, R: Read>(input: &mut R) -> Result<[u8; N], CheckpointError> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CheckpointError::Truncated,
        _ => CheckpointError::Io(e),
    })?;
    Ok(buf)
}

/// Write both tables
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_tables<W: Write>(out: &mut W, tables: &Tables) -> io::Result<()> {
    let mut buf = Vec::with_capacity(STATE_BYTES + WORD_LEN + 4);

    out.write_all(&MAGIC)?;
    out.write_all(&VERSION.to_le_bytes())?;

    out.write_all(&(tables.player.len() as u64).to_le_bytes())?;
    for (state, rank) in &tables.player {
        buf.clear();
        encode_state(state, &mut buf);
        buf.extend_from_slice(&rank.to_raw().to_le_bytes());
        out.write_all(&buf)?;
    }

    out.write_all(&(tables.server.len() as u64).to_le_bytes())?;
    for ((state, word), rank) in &tables.server {
        buf.clear();
        encode_state(state, &mut buf);
        buf.extend_from_slice(word.codes());
        buf.extend_from_slice(&rank.to_raw().to_le_bytes());
        out.write_all(&buf)?;
    }
    Ok(())
}

/// Read both tables, validating every field
///
/// # Errors
/// Returns `CheckpointError` if the data is not a checkpoint, has another
/// version, ends early, carries out-of-range fields or has trailing bytes.
pub fn read_tables<R: Read>(input: &mut R) -> Result<Tables, CheckpointError> {
    if read_array::<4, _>(input)? != MAGIC {
        return Err(CheckpointError::BadMagic);
    }
    let version = u32::from_le_bytes(read_array(input)?);
    if version != VERSION {
        return Err(CheckpointError::UnsupportedVersion(version));
    }

    let mut tables = Tables::default();

    let count = u64::from_le_bytes(read_array(input)?);
    tables.player.reserve(count.min(PREALLOCATE_LIMIT) as usize);
    for _ in 0..count {
        let state = decode_state(&read_array(input)?)?;
        let rank = decode_rank(read_array(input)?)?;
        tables.player.insert(state, rank);
    }

    let count = u64::from_le_bytes(read_array(input)?);
    tables.server.reserve(count.min(PREALLOCATE_LIMIT) as usize);
    for _ in 0..count {
        let state = decode_state(&read_array(input)?)?;
        let word = decode_word(&read_array::<WORD_LEN, _>(input)?)?;
        let rank = decode_rank(read_array(input)?)?;
        tables.server.insert((state, word), rank);
    }

    let mut probe = [0u8; 1];
    if input.read(&mut probe)? != 0 {
        return Err(CheckpointError::Corrupt("trailing data".to_string()));
    }
    Ok(tables)
}
