use crate::{
    codegen::{PrintMode, Printer, Unsupported},
    syntax::{annot::Annot, form::Form},
};

/// Placeholder for HTML rendering, which is not implemented.
pub struct HtmlPrinter;

impl HtmlPrinter {
    pub fn new() -> HtmlPrinter {
        HtmlPrinter {}
    }
}

impl Printer for HtmlPrinter {
    type Output = Result<String, Unsupported>;

    fn print_node(&self, _: &Form) -> Self::Output {
        Err(Unsupported(PrintMode::Html))
    }

    fn print_annot_node(&self, _: &Annot) -> Self::Output {
        Err(Unsupported(PrintMode::Html))
    }

    fn print_empty(&self) -> Self::Output {
        Err(Unsupported(PrintMode::Html))
    }
}
