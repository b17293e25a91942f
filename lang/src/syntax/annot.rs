use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::syntax::{
    error::{AnnotError, AnnotErrorKind, AnnotErrorKind::*},
    form::{into_vec, is_atom, Atom, Form, Ident, Position, Sexp},
    literal::is_identifier,
};

#[derive(Debug, PartialEq, Clone)]
pub struct Binding {
    pub name: Ident,
    pub value: Ast,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Param {
    pub id: Ident,
    pub ty: Option<Ident>,
}

/// Bodies of `let`, `defn` and `lambda` hold one or more expressions,
/// evaluated in order.
#[derive(Debug, PartialEq, Clone)]
pub enum Annot {
    AtomAst(Atom),
    CallAst(Box<Ast>, Vec<Ast>),
    LetAst(Vec<Binding>, Vec<Ast>),
    FunctionAst(Ident, Vec<Param>, Box<Ast>, Vec<Ast>),
    LambdaAst(Vec<Param>, Vec<Ast>),
}

/// `None` is the unit value.
pub type Ast = Option<Annot>;

use self::Annot::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum SpecialForm {
    Let,
    Defn,
    Lambda,
}

lazy_static! {
    static ref SPECIAL_FORMS: HashMap<&'static str, SpecialForm> = {
        let mut forms = HashMap::new();
        forms.insert("let", SpecialForm::Let);
        forms.insert("defn", SpecialForm::Defn);
        forms.insert("lambda", SpecialForm::Lambda);
        forms
    };
}

pub fn annotate(sexp: Sexp) -> Result<Ast, AnnotError> {
    let node = match sexp {
        Some(node) => node,
        None => return Ok(None),
    };
    if let Form::AtomForm(atom) = node.as_ref() {
        return Ok(Some(AtomAst(atom.clone())));
    }
    annotate_list(node).map(Some)
}

pub fn annotate_all(forms: Vec<Sexp>) -> Result<Vec<Ast>, AnnotError> {
    forms.into_iter().map(annotate).collect()
}

fn annotate_list(list: Box<Form>) -> Result<Annot, AnnotError> {
    let mut items = into_vec(Some(list)).into_iter();
    let head = items.next().unwrap_or(None);
    let rest: Vec<Sexp> = items.collect();

    let special = match head.as_deref() {
        Some(Form::AtomForm(atom)) => SPECIAL_FORMS
            .get(atom.value.as_str())
            .map(|form| (*form, atom.pos)),
        _ => None,
    };

    match special {
        Some((SpecialForm::Let, pos)) => process_let_form(pos, rest),
        Some((SpecialForm::Defn, pos)) => process_function_form(pos, rest),
        Some((SpecialForm::Lambda, pos)) => process_lambda_form(pos, rest),
        None => {
            let callee = annotate(head)?;
            Ok(CallAst(Box::new(callee), annotate_all(rest)?))
        }
    }
}

fn process_let_form(pos: Position, mut list: Vec<Sexp>) -> Result<Annot, AnnotError> {
    match list.len() {
        0 => Err(AnnotError::new(LetNoBindings, pos)),
        1 => Err(AnnotError::new(NoBody, pos)),
        _ => {
            let body = list.split_off(1);
            let bindings = list.remove(0);
            process_let(pos, bindings, body)
        }
    }
}

fn process_let(pos: Position, bindings: Sexp, body: Vec<Sexp>) -> Result<Annot, AnnotError> {
    if bindings.is_none() {
        return Err(AnnotError::new(LetNoBindings, pos));
    }
    if is_atom(&bindings) {
        return Err(AnnotError::with_form(LetBadBindings, pos, bindings));
    }

    let items = into_vec(bindings);
    if items.len() % 2 != 0 {
        let bindings = crate::syntax::form::list(items);
        return Err(AnnotError::with_form(LetBadBindings, pos, bindings));
    }

    let mut bind = Vec::with_capacity(items.len() / 2);
    let mut items = items.into_iter();
    while let (Some(name), Some(value)) = (items.next(), items.next()) {
        let name = expect_identifier(name, LetNonSymbolBinding, pos)?;
        bind.push(Binding {
            name,
            value: annotate(value)?,
        });
    }

    Ok(LetAst(bind, annotate_all(body)?))
}

fn process_function_form(pos: Position, list: Vec<Sexp>) -> Result<Annot, AnnotError> {
    match list.len() {
        0 => Err(AnnotError::new(FnNoName, pos)),
        1 => Err(AnnotError::new(FnNoArgs, pos)),
        2 => Err(AnnotError::new(FnNoRet, pos)),
        3 => Err(AnnotError::new(NoBody, pos)),
        _ => {
            let mut iter = list.into_iter();
            let name = iter.next().unwrap_or(None);
            let args = iter.next().unwrap_or(None);
            let ret = iter.next().unwrap_or(None);
            process_fn_definition(pos, name, args, ret, iter.collect())
        }
    }
}

fn process_fn_definition(
    pos: Position,
    name: Sexp,
    args: Sexp,
    ret: Sexp,
    body: Vec<Sexp>,
) -> Result<Annot, AnnotError> {
    let name = expect_identifier(name, FnNonSymbolName, pos)?;
    let params = process_params(pos, args)?;
    let ret = annotate(ret)?;
    Ok(FunctionAst(
        name,
        params,
        Box::new(ret),
        annotate_all(body)?,
    ))
}

fn process_lambda_form(pos: Position, mut list: Vec<Sexp>) -> Result<Annot, AnnotError> {
    match list.len() {
        0 => Err(AnnotError::new(FnNoArgs, pos)),
        1 => Err(AnnotError::new(NoBody, pos)),
        _ => {
            let body = list.split_off(1);
            let args = list.remove(0);
            process_lambda_definition(pos, args, body)
        }
    }
}

fn process_lambda_definition(
    pos: Position,
    args: Sexp,
    body: Vec<Sexp>,
) -> Result<Annot, AnnotError> {
    let params = process_params(pos, args)?;
    Ok(LambdaAst(params, annotate_all(body)?))
}

/// A parameter list is a list of `name` or `(name type)` entries.
fn process_params(pos: Position, args: Sexp) -> Result<Vec<Param>, AnnotError> {
    if is_atom(&args) {
        return Err(AnnotError::with_form(FnBadArgs, pos, args));
    }
    into_vec(args)
        .into_iter()
        .map(|arg| process_param(pos, arg))
        .collect()
}

fn process_param(pos: Position, arg: Sexp) -> Result<Param, AnnotError> {
    if is_atom(&arg) {
        let id = expect_identifier(arg, FnNonSymbolParam, pos)?;
        return Ok(Param { id, ty: None });
    }

    let typed = into_vec(arg);
    if let [id, ty] = typed.as_slice() {
        if let (Some(id), Some(ty)) = (identifier_of(id), identifier_of(ty)) {
            return Ok(Param { id, ty: Some(ty) });
        }
    }
    let arg = crate::syntax::form::list(typed);
    Err(AnnotError::with_form(FnNonSymbolParam, pos, arg))
}

fn identifier_of(sexp: &Sexp) -> Option<Ident> {
    match sexp.as_deref() {
        Some(Form::AtomForm(atom)) if is_identifier(&atom.value) => Some(atom.value.clone()),
        _ => None,
    }
}

fn expect_identifier(
    sexp: Sexp,
    kind: AnnotErrorKind,
    pos: Position,
) -> Result<Ident, AnnotError> {
    match identifier_of(&sexp) {
        Some(id) => Ok(id),
        None => Err(AnnotError::with_form(kind, pos, sexp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{macros::MacroTable, read::read_from_buffer};

    fn annot(input: &str) -> Result<Ast, AnnotError> {
        annotate(read_from_buffer(input, &MacroTable::new()).unwrap())
    }

    fn kind(input: &str) -> AnnotErrorKind {
        annot(input).unwrap_err().kind
    }

    fn atom_value(ast: &Ast) -> &str {
        match ast {
            Some(AtomAst(atom)) => atom.value.as_str(),
            other => panic!("not an atom: {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_atom() {
        assert_eq!(annotate(None), Ok(None));
        assert_eq!(atom_value(&annot("x").unwrap()), "x");
    }

    #[test]
    fn test_call() {
        match annot("(f a (g b) ())").unwrap() {
            Some(CallAst(callee, args)) => {
                assert_eq!(atom_value(&callee), "f");
                assert_eq!(args.len(), 3);
                assert!(matches!(&args[1], Some(CallAst(_, inner)) if inner.len() == 1));
                assert_eq!(args[2], None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_head_is_call() {
        match annot("((lambda (x) x) 1)").unwrap() {
            Some(CallAst(callee, args)) => {
                assert!(matches!(*callee, Some(LambdaAst(_, _))));
                assert_eq!(atom_value(&args[0]), "1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_head_is_call() {
        assert!(matches!(annot("(letx 1)").unwrap(), Some(CallAst(_, _))));
    }

    #[test]
    fn test_let() {
        match annot("(let (x 1) x)").unwrap() {
            Some(LetAst(bindings, body)) => {
                assert_eq!(bindings.len(), 1);
                assert_eq!(bindings[0].name, "x");
                assert_eq!(atom_value(&bindings[0].value), "1");
                assert_eq!(body.len(), 1);
                assert_eq!(atom_value(&body[0]), "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_let_multiple_bindings_and_body() {
        match annot("(let (a (f 1) b 2) (g a) b)").unwrap() {
            Some(LetAst(bindings, body)) => {
                let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b"]);
                assert!(matches!(bindings[0].value, Some(CallAst(_, _))));
                assert_eq!(body.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_let_errors() {
        assert_eq!(kind("(let)"), LetNoBindings);
        assert_eq!(kind("(let () x)"), LetNoBindings);
        assert_eq!(kind("(let (x 1))"), NoBody);
        assert_eq!(kind("(let (x) x)"), LetBadBindings);
        assert_eq!(kind("(let x x)"), LetBadBindings);
        assert_eq!(kind("(let (1 2) x)"), LetNonSymbolBinding);
        assert_eq!(kind("(let ((a) 2) x)"), LetNonSymbolBinding);
        assert_eq!(kind("(let (true 2) x)"), LetNonSymbolBinding);
    }

    #[test]
    fn test_error_carries_keyword_position_and_form() {
        let err = annot("(f\n  (let (1 2) x))").unwrap_err();
        assert_eq!(err.pos, Position::new(1, 3));
        match err.form {
            Some(Some(node)) => match node.as_ref() {
                Form::AtomForm(atom) => assert_eq!(atom.value, "1"),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_error_unwinds() {
        assert_eq!(kind("(f (g (let)))"), LetNoBindings);
        assert_eq!(kind("(let (x (lambda)) x)"), FnNoArgs);
    }

    #[test]
    fn test_defn() {
        match annot("(defn add (a (b Int)) Int (+ a b))").unwrap() {
            Some(FunctionAst(name, params, ret, body)) => {
                assert_eq!(name, "add");
                assert_eq!(
                    params,
                    vec![
                        Param {
                            id: "a".to_owned(),
                            ty: None
                        },
                        Param {
                            id: "b".to_owned(),
                            ty: Some("Int".to_owned())
                        },
                    ]
                );
                assert_eq!(atom_value(&ret), "Int");
                assert_eq!(body.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_defn_unit_return_and_no_params() {
        match annot("(defn f () () 1)").unwrap() {
            Some(FunctionAst(_, params, ret, _)) => {
                assert!(params.is_empty());
                assert_eq!(*ret, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_defn_errors() {
        assert_eq!(kind("(defn)"), FnNoName);
        assert_eq!(kind("(defn f)"), FnNoArgs);
        assert_eq!(kind("(defn f () )"), FnNoRet);
        assert_eq!(kind("(defn f () Int)"), NoBody);
        assert_eq!(kind("(defn 1 () Int x)"), FnNonSymbolName);
        assert_eq!(kind("(defn (f) () Int x)"), FnNonSymbolName);
        assert_eq!(kind("(defn f x Int x)"), FnBadArgs);
        assert_eq!(kind("(defn f (1) Int x)"), FnNonSymbolParam);
        assert_eq!(kind("(defn f ((x)) Int x)"), FnNonSymbolParam);
        assert_eq!(kind("(defn f ((x Int y)) Int x)"), FnNonSymbolParam);
    }

    #[test]
    fn test_lambda() {
        match annot("(lambda (x y) (f x) y)").unwrap() {
            Some(LambdaAst(params, body)) => {
                assert_eq!(params.len(), 2);
                assert_eq!(params[1].id, "y");
                assert_eq!(body.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_lambda_without_params() {
        match annot("(lambda () x)").unwrap() {
            Some(LambdaAst(params, body)) => {
                assert!(params.is_empty());
                assert_eq!(body.len(), 1);
                assert_eq!(atom_value(&body[0]), "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_lambda_errors() {
        assert_eq!(kind("(lambda)"), FnNoArgs);
        assert_eq!(kind("(lambda (x))"), NoBody);
        assert_eq!(kind("(lambda x x)"), FnBadArgs);
    }

    #[test]
    fn test_annotate_all_stops_at_first_error() {
        let forms = vec![
            read_from_buffer("(f x)", &MacroTable::new()).unwrap(),
            read_from_buffer("(defn)", &MacroTable::new()).unwrap(),
            read_from_buffer("(let)", &MacroTable::new()).unwrap(),
        ];
        assert_eq!(annotate_all(forms).unwrap_err().kind, FnNoName);
    }
}
