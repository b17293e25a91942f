use std::path::Path;

use pest::{error::InputLocation, Parser};

use crate::syntax::{
    error::ReadError,
    form::{Atom, Position},
    macros::MacroTable,
};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct SexpLexer;

/// The text a reader runs over, wherever it came from.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Source, ReadError> {
        let name = path.as_ref().display().to_string();
        match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(Source { name, text }),
            Err(err) => Err(ReadError::Io(name, err)),
        }
    }

    pub fn from_buffer<S: Into<String>>(text: S) -> Source {
        Source {
            name: "<buffer>".to_owned(),
            text: text.into(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Open(Position),
    Close(Position),
    Word(Atom),
    Eof(Position),
}

/// Cursor of one parse session: byte offset into the input plus the
/// line/column used for diagnostics.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct LexerState {
    pub offset: usize,
    pub pos: Position,
}

impl LexerState {
    fn advance(&mut self, consumed: &str) {
        for ch in consumed.chars() {
            match ch {
                '\n' => {
                    self.pos.line += 1;
                    self.pos.column = 0;
                }
                _ => self.pos.column += 1,
            }
        }
        self.offset += consumed.len();
    }
}

struct Lexeme<'a> {
    rule: Rule,
    skipped: &'a str,
    text: &'a str,
}

pub struct Lexer<'a> {
    input: &'a str,
    macros: &'a MacroTable,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, macros: &'a MacroTable) -> Lexer<'a> {
        Lexer {
            input,
            macros,
            state: LexerState::default(),
        }
    }

    pub fn reset_position(&mut self) {
        self.state.pos = Position::default();
    }

    /// True when only whitespace and comments are left.
    pub fn at_end(&self) -> Result<bool, ReadError> {
        self.lex().map(|lexeme| lexeme.rule == Rule::EOI)
    }

    pub fn next_token(&mut self) -> Result<Token, ReadError> {
        let lexeme = self.lex()?;
        self.state.advance(lexeme.skipped);
        let pos = self.state.pos;
        self.state.advance(lexeme.text);

        Ok(match lexeme.rule {
            Rule::open => Token::Open(pos),
            Rule::close => Token::Close(pos),
            Rule::string => {
                Token::Word(Atom::new(self.macros.expand_string(lexeme.text), pos))
            }
            Rule::word => Token::Word(Atom::new(self.macros.expand_bare(lexeme.text), pos)),
            Rule::EOI => Token::Eof(pos),
            _ => unreachable!("token should be open, close, string, word or EOI"),
        })
    }

    fn lex(&self) -> Result<Lexeme<'a>, ReadError> {
        let input = self.input;
        let rest = &input[self.state.offset..];
        let mut pairs = SexpLexer::parse(Rule::token, rest).map_err(|e| self.fault(rest, e))?;
        let pair = pairs
            .next()
            .and_then(|token| token.into_inner().next())
            .ok_or_else(|| ReadError::Malformed(self.state.pos))?;
        let span = pair.as_span();
        Ok(Lexeme {
            rule: pair.as_rule(),
            skipped: &rest[..span.start()],
            text: &rest[span.start()..span.end()],
        })
    }

    fn fault(&self, rest: &str, err: pest::error::Error<Rule>) -> ReadError {
        let at = match err.location {
            InputLocation::Pos(at) => at,
            InputLocation::Span((at, _)) => at,
        };
        let mut state = self.state;
        state.advance(&rest[..at]);
        let tail = &rest[at..];
        if tail.starts_with("!-") {
            ReadError::UnterminatedComment(state.pos)
        } else if tail.starts_with('"') {
            ReadError::UnterminatedString(state.pos)
        } else {
            ReadError::Malformed(state.pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str, macros: &MacroTable) -> Vec<String> {
        let mut lexer = Lexer::new(input, macros);
        let mut out = vec![];
        loop {
            match lexer.next_token().unwrap() {
                Token::Open(_) => out.push("(".to_owned()),
                Token::Close(_) => out.push(")".to_owned()),
                Token::Word(atom) => out.push(atom.value),
                Token::Eof(_) => return out,
            }
        }
    }

    #[test]
    fn test_tokens() {
        let macros = MacroTable::new();
        assert_eq!(
            words("(f (g x) \"a b\" -3.14)", &macros),
            vec!["(", "f", "(", "g", "x", ")", "\"a b\"", "-3.14", ")"]
        );
    }

    #[test]
    fn test_paren_ends_word() {
        let macros = MacroTable::new();
        assert_eq!(words("(a)(b)", &macros), vec!["(", "a", ")", "(", "b", ")"]);
    }

    #[test]
    fn test_comments() {
        let macros = MacroTable::new();
        assert_eq!(
            words("a ! line comment\n b !- block\n comment -! c", &macros),
            vec!["a", "b", "c"]
        );
        assert_eq!(words("x !- a -!- b -! y", &macros), vec!["x", "-", "b", "-!", "y"]);
        assert_eq!(words("a ! no newline at the end", &macros), vec!["a"]);
        assert_eq!(words("!--! z", &macros), vec!["z"]);
    }

    #[test]
    fn test_word_containing_bang() {
        let macros = MacroTable::new();
        assert_eq!(words("set! a!b", &macros), vec!["set!", "a!b"]);
    }

    #[test]
    fn test_escaped_quote() {
        let macros = MacroTable::new();
        assert_eq!(
            words(r#""say \"hi\"" x"#, &macros),
            vec![r#""say \"hi\"""#, "x"]
        );
    }

    #[test]
    fn test_positions() {
        let macros = MacroTable::new();
        let mut lexer = Lexer::new("(a\n  bc)", &macros);
        assert_eq!(lexer.next_token().unwrap(), Token::Open(Position::new(0, 0)));
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Word(Atom::new("a", Position::new(0, 1)))
        );
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Word(Atom::new("bc", Position::new(1, 2)))
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Close(Position::new(1, 4)));
        assert!(lexer.at_end().unwrap());
    }

    #[test]
    fn test_macros_applied() {
        let mut macros = MacroTable::new();
        macros.define_word("T", "true");
        macros.define_prefix('#', "hash-");
        macros.define_postfix('!', "-bang");
        assert_eq!(
            words("(T #foo! \"T\")", &macros),
            vec!["(", "true", "hash-foo-bang", "\"true\"", ")"]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let macros = MacroTable::new();
        let mut lexer = Lexer::new("a \"never closed", &macros);
        lexer.next_token().unwrap();
        match lexer.next_token() {
            Err(ReadError::UnterminatedString(pos)) => assert_eq!(pos, Position::new(0, 2)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_comment() {
        let macros = MacroTable::new();
        let mut lexer = Lexer::new("a\n!- never closed", &macros);
        lexer.next_token().unwrap();
        match lexer.next_token() {
            Err(ReadError::UnterminatedComment(pos)) => assert_eq!(pos, Position::new(1, 0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_at_end_does_not_consume() {
        let macros = MacroTable::new();
        let mut lexer = Lexer::new("  a", &macros);
        assert!(!lexer.at_end().unwrap());
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Word(Atom::new("a", Position::new(0, 2)))
        );
        assert!(lexer.at_end().unwrap());
        assert_eq!(lexer.next_token().unwrap(), Token::Eof(Position::new(0, 3)));
    }
}
