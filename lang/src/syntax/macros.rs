use std::collections::HashMap;

/// Text substitution applied by the lexer, once per raw token.
#[derive(Debug, Default, Clone)]
pub struct MacroTable {
    words: HashMap<String, String>,
    prefixes: HashMap<char, String>,
    postfixes: HashMap<char, String>,
    pub allow_redefine: bool,
}

/// Emitted when a word macro is redefined while redefinition is not allowed.
/// The new definition is in effect either way.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MacroWarning {
    pub word: String,
    pub old: String,
    pub new: String,
}

impl std::fmt::Display for MacroWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WARNING: Redefining macro '{}' from '{}' to '{}'.",
            self.word, self.old, self.new
        )
    }
}

impl MacroTable {
    pub fn new() -> MacroTable {
        MacroTable::default()
    }

    pub fn define_word<W, R>(&mut self, word: W, replacement: R) -> Option<MacroWarning>
    where
        W: Into<String>,
        R: Into<String>,
    {
        let word = word.into();
        let replacement = replacement.into();
        let old = self.words.insert(word.clone(), replacement.clone())?;
        match self.allow_redefine {
            true => None,
            false => Some(MacroWarning {
                word,
                old,
                new: replacement,
            }),
        }
    }

    pub fn define_prefix<R: Into<String>>(&mut self, ch: char, replacement: R) {
        self.prefixes.insert(ch, replacement.into());
    }

    pub fn define_postfix<R: Into<String>>(&mut self, ch: char, replacement: R) {
        self.postfixes.insert(ch, replacement.into());
    }

    pub fn words(&self) -> impl Iterator<Item = (&String, &String)> {
        self.words.iter()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&char, &String)> {
        self.prefixes.iter()
    }

    pub fn postfixes(&self) -> impl Iterator<Item = (&char, &String)> {
        self.postfixes.iter()
    }

    /// Whole-token lookup; an unknown word is returned as is.
    pub fn expand_word(&self, word: &str) -> String {
        match self.words.get(word) {
            Some(replacement) => replacement.clone(),
            None => word.to_owned(),
        }
    }

    /// Replaces the leading and trailing character of words of at least
    /// three characters. Both sides are looked up on the original word.
    pub fn expand_affixes(&self, word: String) -> String {
        let mut chars = word.chars();
        let (first, last) = match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if word.chars().count() >= 3 => (first, last),
            _ => return word,
        };

        let mut word = word;
        if let Some(replacement) = self.prefixes.get(&first) {
            word = format!("{}{}", replacement, &word[first.len_utf8()..]);
        }
        if let Some(replacement) = self.postfixes.get(&last) {
            word.truncate(word.len() - last.len_utf8());
            word.push_str(replacement);
        }
        word
    }

    /// Expansion of a bare word token.
    pub fn expand_bare(&self, word: &str) -> String {
        self.expand_affixes(self.expand_word(word))
    }

    /// Expansion of a string token, quotes included. The lookup is done on
    /// the text between the quotes and a replacement is quoted again.
    pub fn expand_string(&self, literal: &str) -> String {
        let inner = &literal[1..literal.len() - 1];
        match self.words.get(inner) {
            Some(replacement) => format!("\"{}\"", replacement),
            None => literal.to_owned(),
        }
    }
}
