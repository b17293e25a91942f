use crate::syntax::{
    annot::{annotate_all, Ast},
    error::FrontError,
    macros::MacroTable,
    read::Reader,
};

extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod codegen;
pub mod syntax;

pub struct Frontend;

impl Frontend {
    /// Reads every top-level form of `input` and annotates them in order.
    pub fn compile(macros: &MacroTable, input: &str) -> Result<Vec<Ast>, FrontError> {
        let forms = Reader::new(input, macros).read_all()?;
        Ok(annotate_all(forms)?)
    }
}
