use crate::syntax::{
    annot::{Annot, Ast},
    form::{Form, Sexp},
};

pub mod html;
pub mod text;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrintMode {
    Text,
    Html,
}

pub trait Printer {
    type Output;

    fn print_node(&self, _: &Form) -> Self::Output;

    fn print_annot_node(&self, _: &Annot) -> Self::Output;

    fn print_empty(&self) -> Self::Output;

    fn print_form(&self, sexp: &Sexp) -> Self::Output {
        match sexp {
            Some(node) => self.print_node(node),
            None => self.print_empty(),
        }
    }

    fn print_annot(&self, ast: &Ast) -> Self::Output {
        match ast {
            Some(annot) => self.print_annot_node(annot),
            None => self.print_empty(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Unsupported(pub PrintMode);

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrintError: {:?} output is not supported", self.0)
    }
}

impl std::error::Error for Unsupported {}

pub fn print_form(mode: PrintMode, sexp: &Sexp) -> Result<String, Unsupported> {
    match mode {
        PrintMode::Text => Ok(text::TextPrinter::new().print_form(sexp)),
        PrintMode::Html => html::HtmlPrinter::new().print_form(sexp),
    }
}

pub fn print_annot(mode: PrintMode, ast: &Ast) -> Result<String, Unsupported> {
    match mode {
        PrintMode::Text => Ok(text::TextPrinter::new().print_annot(ast)),
        PrintMode::Html => html::HtmlPrinter::new().print_annot(ast),
    }
}
