use crate::syntax::form::{Position, Sexp};
use std::fmt::Formatter;

/// Faults of the character stream. A read that hits one of these is
/// abandoned; nothing partial is returned.
#[derive(Debug)]
pub enum ReadError {
    Io(String, std::io::Error),
    UnterminatedString(Position),
    UnterminatedComment(Position),
    // a list was still open when the input ran out
    UnexpectedEof(Position),
    Malformed(Position),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(path, err) => write!(f, "ReadError: cannot read '{}': {}", path, err),
            ReadError::UnterminatedString(pos) => {
                write!(f, "{}: ReadError: unterminated string literal", pos)
            }
            ReadError::UnterminatedComment(pos) => {
                write!(f, "{}: ReadError: unterminated block comment", pos)
            }
            ReadError::UnexpectedEof(pos) => {
                write!(f, "{}: ReadError: unexpected end of input inside a list", pos)
            }
            ReadError::Malformed(pos) => write!(f, "{}: ReadError: unreadable input", pos),
        }
    }
}

impl std::error::Error for ReadError {}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AnnotErrorKind {
    LetNoBindings,
    LetBadBindings,
    LetNonSymbolBinding,
    NoBody,
    FnNoName,
    FnNoArgs,
    FnNoRet,
    FnNonSymbolName,
    FnBadArgs,
    FnNonSymbolParam,
}

impl AnnotErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            AnnotErrorKind::LetNoBindings => "no bindings in let form",
            AnnotErrorKind::LetBadBindings => {
                "let bindings must be a list of name/value pairs"
            }
            AnnotErrorKind::LetNonSymbolBinding => "let binding name is not a symbol",
            AnnotErrorKind::NoBody => "missing body",
            AnnotErrorKind::FnNoName => "function definition has no name",
            AnnotErrorKind::FnNoArgs => "missing argument list",
            AnnotErrorKind::FnNoRet => "function definition has no return type",
            AnnotErrorKind::FnNonSymbolName => "function name is not a symbol",
            AnnotErrorKind::FnBadArgs => "argument list must be a list",
            AnnotErrorKind::FnNonSymbolParam => {
                "parameter must be a symbol or a (name type) pair of symbols"
            }
        }
    }
}

/// A shape violation found by the annotator. `pos` is the position of the
/// special form keyword, `form` the offending sub-form if there is one.
#[derive(Debug, PartialEq, Clone)]
pub struct AnnotError {
    pub kind: AnnotErrorKind,
    pub pos: Position,
    pub form: Option<Sexp>,
    pub path: Option<String>,
}

impl AnnotError {
    pub fn new(kind: AnnotErrorKind, pos: Position) -> AnnotError {
        AnnotError {
            kind,
            pos,
            form: None,
            path: None,
        }
    }

    pub fn with_form(kind: AnnotErrorKind, pos: Position, form: Sexp) -> AnnotError {
        AnnotError {
            form: Some(form),
            ..AnnotError::new(kind, pos)
        }
    }

    pub fn with_path(self, path: &str) -> AnnotError {
        AnnotError {
            path: Some(path.to_owned()),
            ..self
        }
    }
}

impl std::fmt::Display for AnnotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use crate::codegen::{text::TextPrinter, Printer};
        if let Some(path) = &self.path {
            write!(f, "{}:", path)?;
        }
        write!(f, "{}: AnnotError: {}", self.pos, self.kind.message())?;
        if let Some(form) = &self.form {
            write!(f, "\n  in: {}", TextPrinter::new().print_form(form))?;
        }
        Ok(())
    }
}

impl std::error::Error for AnnotError {}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FormError {
    NotAList,
    OutOfRange { index: usize, length: usize },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::NotAList => write!(f, "FormError: expected a list, found an atom"),
            FormError::OutOfRange { index, length } => write!(
                f,
                "FormError: index {} out of range for a list of length {}",
                index, length
            ),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug)]
pub enum FrontError {
    Read(ReadError),
    Annot(AnnotError),
}

impl From<ReadError> for FrontError {
    fn from(e: ReadError) -> Self {
        FrontError::Read(e)
    }
}

impl From<AnnotError> for FrontError {
    fn from(e: AnnotError) -> Self {
        FrontError::Annot(e)
    }
}

impl std::fmt::Display for FrontError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontError::Read(e) => write!(f, "{}", e),
            FrontError::Annot(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FrontError {}
