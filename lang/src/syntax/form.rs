use crate::syntax::error::FormError;

pub type Ident = String;

/// Line and column of the first character of a token, both counted from 0
/// at the start of the current top-level read.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Position {
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Atom {
    pub value: String,
    pub pos: Position,
}

impl Atom {
    pub fn new<S: Into<String>>(value: S, pos: Position) -> Atom {
        Atom {
            value: value.into(),
            pos,
        }
    }
}

/// A raw syntax tree node. The empty list is not a node: it is the `None`
/// of a [`Sexp`]. Every node is owned by exactly one parent.
///
/// Dropping, cloning and comparing walk the `rest` chain in a loop, so a
/// flat list of any length costs no stack. Only nesting depth recurses.
#[derive(Debug)]
pub enum Form {
    AtomForm(Atom),
    PairForm(Sexp, Sexp),
}

pub type Sexp = Option<Box<Form>>;

use self::Form::*;

impl Drop for Form {
    fn drop(&mut self) {
        if let PairForm(_, rest) = self {
            let mut rest = rest.take();
            while let Some(mut node) = rest {
                rest = match node.as_mut() {
                    PairForm(_, next) => next.take(),
                    AtomForm(_) => None,
                };
            }
        }
    }
}

impl Clone for Form {
    fn clone(&self) -> Form {
        match self {
            AtomForm(atom) => AtomForm(atom.clone()),
            PairForm(first, rest) => {
                let mut cars = Vec::new();
                let mut tail = None;
                let mut cursor = rest;
                while let Some(node) = cursor {
                    match node.as_ref() {
                        PairForm(first, rest) => {
                            cars.push(first.clone());
                            cursor = rest;
                        }
                        AtomForm(atom) => {
                            tail = Some(Box::new(AtomForm(atom.clone())));
                            break;
                        }
                    }
                }
                let rest = cars
                    .into_iter()
                    .rev()
                    .fold(tail, |rest, first| cons(first, rest));
                PairForm(first.clone(), rest)
            }
        }
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Form) -> bool {
        equal_by(Some(self), Some(other), |a, b| a == b)
    }
}

fn equal_by(lhs: Option<&Form>, rhs: Option<&Form>, atoms: fn(&Atom, &Atom) -> bool) -> bool {
    let (mut lhs, mut rhs) = (lhs, rhs);
    loop {
        match (lhs, rhs) {
            (None, None) => return true,
            (Some(AtomForm(a)), Some(AtomForm(b))) => return atoms(a, b),
            (Some(PairForm(af, ar)), Some(PairForm(bf, br))) => {
                if !equal_by(af.as_deref(), bf.as_deref(), atoms) {
                    return false;
                }
                lhs = ar.as_deref();
                rhs = br.as_deref();
            }
            _ => return false,
        }
    }
}

pub fn atom(atom: Atom) -> Sexp {
    Some(Box::new(AtomForm(atom)))
}

pub fn cons(first: Sexp, rest: Sexp) -> Sexp {
    Some(Box::new(PairForm(first, rest)))
}

/// Builds a proper list out of `items`, last element first.
pub fn list<I>(items: I) -> Sexp
where
    I: IntoIterator<Item = Sexp>,
    I::IntoIter: DoubleEndedIterator,
{
    items
        .into_iter()
        .rev()
        .fold(None, |rest, first| cons(first, rest))
}

/// Attaches `tail` as the `rest` of the last pair of `list`.
/// An empty `list` simply becomes `tail`, and an atom (or the atom ending
/// an improper list) becomes the `first` of a new pair.
pub fn push(list: &mut Sexp, tail: Sexp) {
    let items = into_vec(list.take());
    *list = items
        .into_iter()
        .rev()
        .fold(tail, |rest, first| cons(first, rest));
}

/// Number of pairs along the `rest` chain. An improper tail is not counted.
pub fn length(sexp: &Sexp) -> usize {
    elements(sexp).filter(|it| it.is_car()).count()
}

pub fn append(lhs: Sexp, rhs: Sexp) -> Result<Sexp, FormError> {
    if is_atom(&lhs) || is_atom(&rhs) {
        return Err(FormError::NotAList);
    }
    let mut items = into_elements(lhs);
    if items.iter().any(|it| !it.is_car()) {
        return Err(FormError::NotAList);
    }
    let mut joined = rhs;
    while let Some(item) = items.pop() {
        joined = cons(item.into_inner(), joined);
    }
    Ok(joined)
}

pub fn nth(sexp: &Sexp, index: usize) -> Result<&Sexp, FormError> {
    elements(sexp)
        .filter(|it| it.is_car())
        .nth(index)
        .map(Element::into_inner)
        .ok_or_else(|| FormError::OutOfRange {
            index,
            length: length(sexp),
        })
}

pub fn is_atom(sexp: &Sexp) -> bool {
    matches!(sexp.as_deref(), Some(AtomForm(_)))
}

pub fn is_list(sexp: &Sexp) -> bool {
    !is_atom(sexp)
}

/// Compares shape and atom values, ignoring positions.
pub fn same_shape(lhs: &Sexp, rhs: &Sexp) -> bool {
    equal_by(lhs.as_deref(), rhs.as_deref(), |a, b| a.value == b.value)
}

/// One step of a list walk: either the `first` of a pair, or the non-pair
/// value that ends an improper list.
#[derive(Debug, PartialEq, Clone)]
pub enum Element<T> {
    Car(T),
    Tail(T),
}

impl<T> Element<T> {
    pub fn is_car(&self) -> bool {
        matches!(self, Element::Car(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Element::Car(t) | Element::Tail(t) => t,
        }
    }
}

pub struct Elements<'a> {
    cursor: Option<&'a Sexp>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<&'a Sexp>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        match current.as_deref() {
            None => None,
            Some(PairForm(first, rest)) => {
                self.cursor = Some(rest);
                Some(Element::Car(first))
            }
            Some(AtomForm(_)) => Some(Element::Tail(current)),
        }
    }
}

/// Walks a list without consuming it. An atom yields itself as a tail.
pub fn elements(sexp: &Sexp) -> Elements<'_> {
    Elements {
        cursor: Some(sexp),
    }
}

/// Takes a list apart into its elements, giving up ownership of the tree.
pub fn into_elements(sexp: Sexp) -> Vec<Element<Sexp>> {
    let mut items = Vec::new();
    let mut cursor = sexp;
    while let Some(mut node) = cursor {
        match node.as_mut() {
            PairForm(first, rest) => {
                items.push(Element::Car(first.take()));
                cursor = rest.take();
            }
            AtomForm(_) => {
                items.push(Element::Tail(Some(node)));
                cursor = None;
            }
        }
    }
    items
}

/// Takes a list apart; an improper tail is kept as the last element.
pub fn into_vec(sexp: Sexp) -> Vec<Sexp> {
    into_elements(sexp)
        .into_iter()
        .map(Element::into_inner)
        .collect()
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::codegen::{text::TextPrinter, Printer};
        let gen = TextPrinter::new();
        write!(f, "{}", gen.print_node(self))
    }
}
