use std::path::Path;

use crate::syntax::{
    error::ReadError,
    form::{atom, cons, Sexp},
    lex::{Lexer, Source, Token},
    macros::MacroTable,
};

pub struct Reader<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str, macros: &'a MacroTable) -> Reader<'a> {
        Reader {
            lexer: Lexer::new(input, macros),
        }
    }

    pub fn from_source(source: &'a Source, macros: &'a MacroTable) -> Reader<'a> {
        Reader::new(source.text.as_str(), macros)
    }

    /// Reads one top-level form. A stray `)` and an exhausted input both
    /// read as the empty form.
    pub fn read(&mut self) -> Result<Sexp, ReadError> {
        self.lexer.reset_position();
        self.read_form()
    }

    fn read_form(&mut self) -> Result<Sexp, ReadError> {
        match self.lexer.next_token()? {
            Token::Open(_) => self.read_tail(),
            Token::Word(word) => Ok(atom(word)),
            Token::Close(_) | Token::Eof(_) => Ok(None),
        }
    }

    /// Reads the elements of a list whose `(` was already consumed, up to
    /// and including the matching `)`.
    pub fn read_tail(&mut self) -> Result<Sexp, ReadError> {
        let mut items = Vec::new();
        loop {
            match self.lexer.next_token()? {
                Token::Close(_) => break,
                Token::Open(_) => items.push(self.read_tail()?),
                Token::Word(word) => items.push(atom(word)),
                Token::Eof(pos) => return Err(ReadError::UnexpectedEof(pos)),
            }
        }
        Ok(items
            .into_iter()
            .rev()
            .fold(None, |rest, first| cons(first, rest)))
    }

    /// Reads top-level forms until only trivia is left. Positions count
    /// from where this call started, so they stay meaningful across forms.
    pub fn read_all(&mut self) -> Result<Vec<Sexp>, ReadError> {
        self.lexer.reset_position();
        let mut forms = Vec::new();
        while !self.lexer.at_end()? {
            forms.push(self.read_form()?);
        }
        Ok(forms)
    }
}

pub fn read_from_buffer(text: &str, macros: &MacroTable) -> Result<Sexp, ReadError> {
    let source = Source::from_buffer(text);
    Reader::from_source(&source, macros).read()
}

pub fn read_from_file<P: AsRef<Path>>(path: P, macros: &MacroTable) -> Result<Sexp, ReadError> {
    let source = Source::from_file(path)?;
    Reader::from_source(&source, macros).read()
}
