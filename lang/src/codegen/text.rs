use crate::{
    codegen::Printer,
    syntax::{
        annot::{
            Annot,
            Annot::{AtomAst, CallAst, FunctionAst, LambdaAst, LetAst},
            Ast, Binding, Param,
        },
        form::{
            Form,
            Form::{AtomForm, PairForm},
            Sexp,
        },
    },
};

/// Renders either tree back into source text the reader accepts.
pub struct TextPrinter;

impl TextPrinter {
    pub fn new() -> TextPrinter {
        TextPrinter {}
    }
}

impl Printer for TextPrinter {
    type Output = String;

    fn print_node(&self, form: &Form) -> String {
        form.print_text()
    }

    fn print_annot_node(&self, annot: &Annot) -> String {
        annot.print_text()
    }

    fn print_empty(&self) -> String {
        "()".to_owned()
    }
}

trait TargetText {
    fn print_text(&self) -> String;
}

impl<T: TargetText> TargetText for Option<T> {
    fn print_text(&self) -> String {
        match self {
            Some(t) => t.print_text(),
            None => "()".to_owned(),
        }
    }
}

impl<T: TargetText> TargetText for Box<T> {
    fn print_text(&self) -> String {
        (**self).print_text()
    }
}

impl<T: TargetText> TargetText for Vec<T> {
    fn print_text(&self) -> String {
        self.iter()
            .map(|t| t.print_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TargetText for Form {
    fn print_text(&self) -> String {
        match self {
            AtomForm(atom) => atom.value.clone(),
            PairForm(first, rest) => {
                let mut out = format!("({}", first.print_text());
                let mut cursor = rest;
                loop {
                    match cursor.as_deref() {
                        None => break,
                        Some(PairForm(first, rest)) => {
                            out.push(' ');
                            out.push_str(first.print_text().as_str());
                            cursor = rest;
                        }
                        Some(tail @ AtomForm(_)) => {
                            out.push_str(" . ");
                            out.push_str(tail.print_text().as_str());
                            break;
                        }
                    }
                }
                out.push(')');
                out
            }
        }
    }
}

impl TargetText for Binding {
    fn print_text(&self) -> String {
        format!("{} {}", self.name, self.value.print_text())
    }
}

impl TargetText for Param {
    fn print_text(&self) -> String {
        match &self.ty {
            Some(ty) => format!("({} {})", self.id, ty),
            None => self.id.clone(),
        }
    }
}

impl TargetText for Annot {
    fn print_text(&self) -> String {
        match self {
            AtomAst(atom) => atom.value.clone(),
            CallAst(callee, args) => print_list(callee.print_text(), args),
            LetAst(bindings, body) => {
                format!("(let ({}) {})", bindings.print_text(), body.print_text())
            }
            FunctionAst(name, params, ret, body) => format!(
                "(defn {} ({}) {} {})",
                name,
                params.print_text(),
                ret.print_text(),
                body.print_text()
            ),
            LambdaAst(params, body) => {
                format!("(lambda ({}) {})", params.print_text(), body.print_text())
            }
        }
    }
}

fn print_list(head: String, rest: &Vec<Ast>) -> String {
    match rest.len() {
        0 => format!("({})", head),
        _ => format!("({} {})", head, rest.print_text()),
    }
}

pub fn print_forms(forms: &Vec<Sexp>) -> String {
    forms
        .iter()
        .map(|form| form.print_text())
        .collect::<Vec<_>>()
        .join("\n")
}
