//! Line-oriented reader for the game's turn input.

use std::io::BufRead;

use hypersonic_core::{
    BonusItem, CellKind, EntitySnapshot, Hazard, ItemKind, PlayerId, Position, TurnSnapshot,
};
use thiserror::Error;

const ENTITY_ACTOR: i32 = 0;
const ENTITY_BOMB: i32 = 1;
const ENTITY_ITEM: i32 = 2;

/// Largest board the reader accepts, in cells.
const MAX_ARENA_CELLS: u64 = 1 << 20;

/// Arena description sent once before the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) player: PlayerId,
}

/// Errors raised while reading malformed game input.
#[derive(Debug, Error)]
pub(crate) enum ProtocolError {
    #[error("failed to read game input")]
    Io(#[from] std::io::Error),
    #[error("input ended while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("line {line}: expected {expected} integers, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{token}' is not an integer")]
    InvalidInteger { line: usize, token: String },
    #[error("line {line}: {field} must not be negative, got {value}")]
    NegativeValue {
        line: usize,
        field: &'static str,
        value: i32,
    },
    #[error("line {line}: board row has {found} cells, expected {expected}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: arena of {width}x{height} cells is too large")]
    ArenaTooLarge { line: usize, width: u32, height: u32 },
    #[error("line {line}: entity at ({x}, {y}) lies outside the arena")]
    OutOfBounds { line: usize, x: i32, y: i32 },
}

/// Reads the header and per-turn snapshots from a buffered source.
#[derive(Debug)]
pub(crate) struct ProtocolReader<R> {
    input: R,
    line: usize,
    buffer: String,
}

impl<R: BufRead> ProtocolReader<R> {
    pub(crate) fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            buffer: String::new(),
        }
    }

    /// Reads the `width height myId` line.
    pub(crate) fn read_header(&mut self) -> Result<Header, ProtocolError> {
        let line = self.expect_line("the arena header")?;
        let [width, height, player] = parse_fields::<3>(self.line, &line)?;
        let width = non_negative(self.line, "width", width)?;
        let height = non_negative(self.line, "height", height)?;
        if u64::from(width) * u64::from(height) > MAX_ARENA_CELLS {
            return Err(ProtocolError::ArenaTooLarge {
                line: self.line,
                width,
                height,
            });
        }
        Ok(Header {
            width,
            height,
            player: PlayerId::new(non_negative(self.line, "player id", player)?),
        })
    }

    /// Reads the next turn, or `None` when the input ends between turns.
    pub(crate) fn read_turn(
        &mut self,
        header: &Header,
    ) -> Result<Option<TurnSnapshot>, ProtocolError> {
        let Some(first) = self.next_non_blank_line()? else {
            return Ok(None);
        };
        let mut pending = Some(first);

        let mut rows = Vec::with_capacity(header.height as usize);
        for _ in 0..header.height {
            let line = match pending.take() {
                Some(line) => line,
                None => self.expect_line("a board row")?,
            };
            rows.push(parse_row(self.line, &line, header.width as usize)?);
        }

        let line = match pending.take() {
            Some(line) => line,
            None => self.expect_line("the entity count")?,
        };
        let [count] = parse_fields::<1>(self.line, &line)?;
        let count = non_negative(self.line, "entity count", count)?;

        let mut entities = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let line = self.expect_line("an entity")?;
            if let Some(entity) = parse_entity(self.line, &line, header)? {
                entities.push(entity);
            }
        }

        Ok(Some(TurnSnapshot { rows, entities }))
    }

    fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        self.buffer.clear();
        if self.input.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r']).to_owned()))
    }

    fn next_non_blank_line(&mut self) -> Result<Option<String>, ProtocolError> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.next_line()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }
}

fn parse_fields<const N: usize>(line: usize, text: &str) -> Result<[i32; N], ProtocolError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != N {
        return Err(ProtocolError::FieldCount {
            line,
            expected: N,
            found: tokens.len(),
        });
    }

    let mut fields = [0; N];
    for (field, token) in fields.iter_mut().zip(tokens) {
        *field = token
            .parse()
            .map_err(|_| ProtocolError::InvalidInteger {
                line,
                token: token.to_owned(),
            })?;
    }
    Ok(fields)
}

fn non_negative(line: usize, field: &'static str, value: i32) -> Result<u32, ProtocolError> {
    u32::try_from(value).map_err(|_| ProtocolError::NegativeValue { line, field, value })
}

fn parse_row(line: usize, text: &str, width: usize) -> Result<Vec<CellKind>, ProtocolError> {
    let text = text.trim();
    let found = text.chars().count();
    if found != width {
        return Err(ProtocolError::RowWidth {
            line,
            expected: width,
            found,
        });
    }

    let row: Vec<CellKind> = text
        .chars()
        .map(|symbol| match CellKind::from_symbol(symbol) {
            Some(kind) if kind == CellKind::Floor || kind.is_box() => kind,
            _ => {
                tracing::debug!(line, %symbol, "treating unknown cell symbol as floor");
                CellKind::Floor
            }
        })
        .collect();
    Ok(row)
}

fn parse_entity(
    line: usize,
    text: &str,
    header: &Header,
) -> Result<Option<EntitySnapshot>, ProtocolError> {
    let [kind, owner, x, y, first, second] = parse_fields::<6>(line, text)?;
    let inside = u32::try_from(x).map_or(false, |x| x < header.width)
        && u32::try_from(y).map_or(false, |y| y < header.height);
    if !inside {
        return Err(ProtocolError::OutOfBounds { line, x, y });
    }
    let position = Position::new(x, y);

    let entity = match kind {
        ENTITY_ACTOR => EntitySnapshot::Actor {
            owner: PlayerId::new(non_negative(line, "owner", owner)?),
            position,
            bombs_available: non_negative(line, "bombs available", first)?,
            blast_range: second,
        },
        ENTITY_BOMB => EntitySnapshot::Hazard {
            owner: PlayerId::new(non_negative(line, "owner", owner)?),
            hazard: Hazard {
                position,
                timer: non_negative(line, "bomb timer", first)?,
                blast_range: second,
            },
        },
        ENTITY_ITEM => match ItemKind::from_code(first) {
            Some(kind) => EntitySnapshot::Item(BonusItem { position, kind }),
            None => {
                tracing::debug!(line, code = first, "skipping unknown item");
                return Ok(None);
            }
        },
        other => {
            tracing::debug!(line, kind = other, "skipping unknown entity");
            return Ok(None);
        }
    };
    Ok(Some(entity))
}
