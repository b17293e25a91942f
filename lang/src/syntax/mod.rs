pub mod annot;
pub mod error;
pub mod form;
pub mod lex;
pub mod literal;
pub mod macros;
pub mod read;
