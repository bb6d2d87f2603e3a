//! Hand-written entity reader for the scene script format.
//!
//! The lexer only splits the raw text into `Entity`s and tracks lines.
//! It knows nothing about `dim`, `v`, `t` etc.; those are interpreted by
//! the header parser and the stack machine.
//
//  Lexical items (informal):
//
//      Meta      ::= '%' (MetaToken | MetaString)* ';'
//      Numeric   ::= [+-]? [0-9] WordChar*
//      Operation ::= WordChar+            (anything not numeric)
//      Quoted    ::= Prefix? '"' .*? '"'
//      Curly     ::= Prefix? '{' balanced '}'
//      Group     ::= '(' | ')'     Array ::= '[' | ']' | ','
//      Names     ::= ('?' | '@' | '=' | ':') WordChar+
//      Eof       ::= '|;'
//
//  Whitespace and comments (# until end-of-line) are discarded.

use thiserror::Error;

use crate::error::{ErrorKind, ScriptResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Invalid character")]
    InvalidCharacter,
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated metacommand")]
    UnterminatedMetacommand,
    #[error("Nested metacommand")]
    NestedMetacommand,
    #[error("Semicolon outside of metacommand")]
    SemicolonOutsideMetacommand,
    #[error("Missing name after prefix")]
    MissingName,
    #[error("Content after end of file marker")]
    TrailingData,
}

impl LexError {
    const ALL: [LexError; 8] = [
        LexError::UnexpectedEof,
        LexError::InvalidCharacter,
        LexError::UnterminatedString,
        LexError::UnterminatedMetacommand,
        LexError::NestedMetacommand,
        LexError::SemicolonOutsideMetacommand,
        LexError::MissingName,
        LexError::TrailingData,
    ];

    /// Negative code, starting at -1.
    pub fn code(self) -> i32 {
        let idx = LexError::ALL.iter().position(|e| *e == self).unwrap_or(0);
        -(idx as i32) - 1
    }

    pub fn from_code(code: i32) -> Option<LexError> {
        let idx = usize::try_from(code.checked_neg()?).ok()?.checked_sub(1)?;
        LexError::ALL.get(idx).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Quoted, // "…"
    Curly,  // {…}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    BeginMeta,
    EndMeta,
    MetaToken(String),
    MetaString(String),
    Numeric(String),
    Operation(String),
    Str {
        kind: StringKind,
        prefix: Option<String>,
        payload: String,
    },
    BeginGroup,
    EndGroup,
    BeginArray,
    EndArray,
    ArraySep,
    Variable(String), // ?name
    Constant(String), // @name
    Assign(String),   // =name
    Get(String),      // :name
    Eof,
}

impl Entity {
    /// True for every entity that may only appear in the header.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Entity::BeginMeta | Entity::EndMeta | Entity::MetaToken(_) | Entity::MetaString(_)
        )
    }
}

/// A rewindable stream of entities.
///
/// The compiler reads the same source twice, so implementors must return
/// exactly the same entities after [`EntitySource::rewind`].
pub trait EntitySource {
    fn next_entity(&mut self) -> Result<Entity, LexError>;

    /// Line of the last entity (or error) returned, 1-based.
    fn line(&self) -> u32;

    fn rewind(&mut self);

    /// Call after `Eof`: fails unless only whitespace is left.
    fn consume_trailing(&mut self) -> Result<(), LexError>;

    /// `next_entity` with stream errors tagged by line. Running out of
    /// input is not tied to any line.
    fn read(&mut self) -> ScriptResult<Entity> {
        self.next_entity().map_err(|e| match e {
            LexError::UnexpectedEof => ErrorKind::from(e).at(0),
            _ => ErrorKind::from(e).at(self.line()),
        })
    }
}

#[derive(Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    entity_line: u32,
    in_meta: bool,
    finished: bool,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"\"{}()[],;%#|".contains(&b)
}

fn is_numeric(word: &str) -> bool {
    let digits = word.strip_prefix(['+', '-']).unwrap_or(word);
    digits.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            entity_line: 1,
            in_meta: false,
            finished: false,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek_byte() {
            self.next_byte();
        }
    }

    fn skip_blank(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek_byte() != Some(b'#') {
                break;
            }
            while let Some(b) = self.next_byte() {
                if b == b'\n' {
                    break;
                }
            }
        }
    }

    fn read_word(&mut self) -> String {
        let start = self.pos;
        while self.peek_byte().is_some_and(is_word_byte) {
            self.next_byte();
        }
        self.src[start..self.pos].to_string()
    }

    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        while let Some(b) = self.next_byte() {
            if b == b'"' {
                return Ok(self.src[start..self.pos - 1].to_string());
            }
        }
        Err(LexError::UnterminatedString)
    }

    fn read_curly(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(b) = self.next_byte() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.src[start..self.pos - 1].to_string());
                    }
                }
                _ => {}
            }
        }
        Err(LexError::UnterminatedString)
    }

    fn read_string(&mut self, prefix: Option<String>) -> Result<Entity, LexError> {
        let (kind, payload) = match self.next_byte() {
            Some(b'"') => (StringKind::Quoted, self.read_quoted()?),
            Some(b'{') => (StringKind::Curly, self.read_curly()?),
            _ => return Err(LexError::InvalidCharacter),
        };
        if self.in_meta {
            return Ok(Entity::MetaString(payload));
        }
        Ok(Entity::Str {
            kind,
            prefix,
            payload,
        })
    }

    fn read_name(&mut self, make: fn(String) -> Entity) -> Result<Entity, LexError> {
        self.next_byte();
        let name = self.read_word();
        if name.is_empty() {
            return Err(LexError::MissingName);
        }
        Ok(make(name))
    }

    fn lex_entity(&mut self) -> Result<Entity, LexError> {
        let Some(b) = self.peek_byte() else {
            return Err(if self.in_meta {
                LexError::UnterminatedMetacommand
            } else {
                LexError::UnexpectedEof
            });
        };

        match b {
            b'%' => {
                self.next_byte();
                if self.in_meta {
                    return Err(LexError::NestedMetacommand);
                }
                self.in_meta = true;
                Ok(Entity::BeginMeta)
            }
            b';' => {
                self.next_byte();
                if !self.in_meta {
                    return Err(LexError::SemicolonOutsideMetacommand);
                }
                self.in_meta = false;
                Ok(Entity::EndMeta)
            }
            b'|' => {
                self.next_byte();
                if self.in_meta {
                    return Err(LexError::UnterminatedMetacommand);
                }
                if self.peek_byte() != Some(b';') {
                    return Err(LexError::InvalidCharacter);
                }
                self.next_byte();
                self.finished = true;
                Ok(Entity::Eof)
            }
            b'"' | b'{' => self.read_string(None),
            b'(' | b')' | b'[' | b']' | b',' if !self.in_meta => {
                self.next_byte();
                Ok(match b {
                    b'(' => Entity::BeginGroup,
                    b')' => Entity::EndGroup,
                    b'[' => Entity::BeginArray,
                    b']' => Entity::EndArray,
                    _ => Entity::ArraySep,
                })
            }
            b'?' if !self.in_meta => self.read_name(Entity::Variable),
            b'@' if !self.in_meta => self.read_name(Entity::Constant),
            b'=' if !self.in_meta => self.read_name(Entity::Assign),
            b':' if !self.in_meta => self.read_name(Entity::Get),
            b if is_word_byte(b) => {
                let word = self.read_word();
                if self.in_meta {
                    return Ok(Entity::MetaToken(word));
                }
                if let Some(b'"' | b'{') = self.peek_byte() {
                    return self.read_string(Some(word));
                }
                if is_numeric(&word) {
                    Ok(Entity::Numeric(word))
                } else {
                    Ok(Entity::Operation(word))
                }
            }
            _ => Err(LexError::InvalidCharacter),
        }
    }
}

impl EntitySource for Lexer<'_> {
    fn next_entity(&mut self) -> Result<Entity, LexError> {
        if self.finished {
            return Ok(Entity::Eof);
        }
        self.skip_blank();
        self.entity_line = self.line;
        self.lex_entity()
    }

    fn line(&self) -> u32 {
        self.entity_line
    }

    fn rewind(&mut self) {
        *self = Lexer::new(self.src);
    }

    fn consume_trailing(&mut self) -> Result<(), LexError> {
        self.skip_whitespace();
        self.entity_line = self.line;
        match self.peek_byte() {
            None => Ok(()),
            Some(_) => Err(LexError::TrailingData),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Entity, LexError>;

    /// Yields entities up to and including `Eof`, then stops. Stops after
    /// the first error as well.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let res = self.next_entity();
        if res.is_err() {
            self.finished = true;
        }
        Some(res)
    }
}
