#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LiteralKind {
    BooleanTrue,
    BooleanFalse,
    Integer,
    Character,
    Real,
    Symbol,
    String,
    Unidentifiable,
}

use self::LiteralKind::*;

#[derive(Default)]
struct Scan {
    double_quote: Option<usize>,
    single_quote: Option<usize>,
    period: Option<usize>,
    periods: usize,
    exponent: Option<usize>,
    exponents: usize,
    letter: bool,
    digit: bool,
}

impl Scan {
    fn run(chars: &[char]) -> Scan {
        let mut scan = Scan::default();
        for (i, &ch) in chars.iter().enumerate() {
            match ch {
                '"' => {
                    scan.double_quote.get_or_insert(i);
                }
                '\'' => {
                    scan.single_quote.get_or_insert(i);
                }
                '.' => {
                    scan.period.get_or_insert(i);
                    scan.periods += 1;
                }
                'e' | 'E' => {
                    scan.exponent.get_or_insert(i);
                    scan.exponents += 1;
                }
                _ if ch.is_ascii_digit() => scan.digit = true,
                _ if ch.is_alphabetic() => scan.letter = true,
                _ => (),
            }
        }
        scan
    }
}

/// Guesses the literal kind of a token. The rules are tried in order and
/// each one assumes the ones before it did not match.
pub fn analyze(token: &str) -> LiteralKind {
    let chars: Vec<char> = token.chars().collect();
    let last = match chars.len() {
        0 => return Unidentifiable,
        len => len - 1,
    };
    let followed_by_digit = |i: usize| chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());
    let scan = Scan::run(&chars);

    if scan.double_quote == Some(0) && chars[last] == '"' {
        return String;
    }
    if scan.single_quote == Some(0) && chars[last] == '\'' {
        return Character;
    }

    if scan.digit {
        if scan.letter && scan.exponent.is_none() {
            return Symbol;
        }
        if scan.period.is_some() || scan.exponent.is_some() {
            if let Some(p) = scan.period {
                if scan.periods == 1 && p != last && followed_by_digit(p) {
                    return Real;
                }
            }
            if let Some(e) = scan.exponent {
                if scan.exponents == 1 && e != 0 && e != last && followed_by_digit(e) {
                    return Real;
                }
            }
            return Unidentifiable;
        }
        return Integer;
    }

    match token {
        "true" => BooleanTrue,
        "false" => BooleanFalse,
        _ => Symbol,
    }
}

pub fn is_identifier(token: &str) -> bool {
    analyze(token) == Symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_kinds() {
        assert_eq!(analyze("true"), BooleanTrue);
        assert_eq!(analyze("false"), BooleanFalse);
        assert_eq!(analyze("42"), Integer);
        assert_eq!(analyze("-3.14"), Real);
        assert_eq!(analyze("1e10"), Real);
        assert_eq!(analyze("\"hi\""), String);
        assert_eq!(analyze("'a'"), Character);
        assert_eq!(analyze("abc"), Symbol);
        assert_eq!(analyze("a1"), Symbol);
    }

    #[test]
    fn test_reals() {
        assert_eq!(analyze("0.5"), Real);
        assert_eq!(analyze(".5"), Real);
        assert_eq!(analyze("2E8"), Real);
        assert_eq!(analyze("1.5e10"), Real);
    }

    #[test]
    fn test_fallthrough_cases() {
        // one-dot and exponent rules both fail
        assert_eq!(analyze("1."), Unidentifiable);
        assert_eq!(analyze("1.2.3"), Unidentifiable);
        assert_eq!(analyze("1e"), Unidentifiable);
        assert_eq!(analyze("e1"), Unidentifiable);
        assert_eq!(analyze("1e-5"), Unidentifiable);
        assert_eq!(analyze("1ee5"), Unidentifiable);
        // letters next to an exponent marker skip the symbol rule
        assert_eq!(analyze("hello1"), Unidentifiable);
        assert_eq!(analyze("x1e2"), Real);
        // minus signs are not looked at
        assert_eq!(analyze("1-2"), Integer);
        assert_eq!(analyze("-"), Symbol);
        assert_eq!(analyze("."), Symbol);
        assert_eq!(analyze("e"), Symbol);
        assert_eq!(analyze(""), Unidentifiable);
    }

    #[test]
    fn test_quotes_need_both_ends() {
        assert_eq!(analyze("\"open"), Symbol);
        assert_eq!(analyze("'a"), Symbol);
        assert_eq!(analyze("\"12"), Integer);
        assert_eq!(analyze("\"\""), String);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("x"));
        assert!(is_identifier("set!"));
        assert!(!is_identifier("1"));
        assert!(!is_identifier("true"));
        assert!(!is_identifier("\"x\""));
    }
}
