use lang::{
    codegen::PrintMode,
    syntax::macros::{MacroTable, MacroWarning},
};

pub struct Config {
    pub macros: MacroTable,
    pub dump_form: bool,
    pub dump_ast: bool,
    pub print_mode: PrintMode,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    BadMacro(String),
    BadAffix(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::BadMacro(spec) => {
                write!(f, "ConfigError: '{}' should look like WORD=REPLACEMENT", spec)
            }
            ConfigError::BadAffix(spec) => {
                write!(f, "ConfigError: '{}' should look like C=REPLACEMENT", spec)
            }
        }
    }
}

impl Config {
    pub(crate) fn new() -> Self {
        Config {
            macros: MacroTable::new(),
            dump_form: false,
            dump_ast: false,
            print_mode: PrintMode::Text,
        }
    }

    pub(crate) fn define_words<'a, I>(&mut self, specs: I) -> Result<Vec<MacroWarning>, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut warnings = vec![];
        for spec in specs {
            let (word, replacement) = parse_macro(spec)?;
            if let Some(warning) = self.macros.define_word(word, replacement) {
                warnings.push(warning);
            }
        }
        Ok(warnings)
    }

    pub(crate) fn define_prefixes<'a, I>(&mut self, specs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for spec in specs {
            let (ch, replacement) = parse_affix(spec)?;
            self.macros.define_prefix(ch, replacement);
        }
        Ok(())
    }

    pub(crate) fn define_postfixes<'a, I>(&mut self, specs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for spec in specs {
            let (ch, replacement) = parse_affix(spec)?;
            self.macros.define_postfix(ch, replacement);
        }
        Ok(())
    }
}

fn parse_macro(spec: &str) -> Result<(String, String), ConfigError> {
    match spec.find('=') {
        Some(at) if at > 0 => Ok((spec[..at].to_owned(), spec[at + 1..].to_owned())),
        _ => Err(ConfigError::BadMacro(spec.to_owned())),
    }
}

fn parse_affix(spec: &str) -> Result<(char, String), ConfigError> {
    let mut chars = spec.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), Some('=')) => Ok((ch, chars.as_str().to_owned())),
        _ => Err(ConfigError::BadAffix(spec.to_owned())),
    }
}
