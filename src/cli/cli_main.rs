use colored::Colorize;
use rustyline::{
    completion::{Candidate, Completer},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context as RContext, Editor, Helper, Result as RResult,
};

use lang::{
    codegen::{print_annot, print_form},
    syntax::{annot::annotate, lex::Source, read::Reader},
};

use crate::config::Config;

struct REPL {
    rl: Editor<REPLHelper>,
    history_file: Option<String>,
    repl_run: bool,
    prompt: String,
    multiline: bool,
    multiline_buffer: Vec<String>,
}

enum CompleteCandidate {
    Command(String, String),
    Macro(String),
}

impl Candidate for CompleteCandidate {
    fn display(&self) -> &str {
        match self {
            CompleteCandidate::Command(cmd, _) => cmd,
            CompleteCandidate::Macro(word) => word,
        }
    }

    fn replacement(&self) -> &str {
        match self {
            CompleteCandidate::Command(cmd, _) => cmd,
            CompleteCandidate::Macro(word) => word,
        }
    }
}

struct REPLHelper {
    cfg: Config,
}

impl Helper for REPLHelper {}

impl Completer for REPLHelper {
    type Candidate = CompleteCandidate;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &RContext<'_>,
    ) -> RResult<(usize, Vec<Self::Candidate>)> {
        if line.starts_with(":") {
            let commands = vec![
                (":q", "Quit REPL"),
                (":{", "Start multi-line mode"),
                (":}", "End multi-line mode"),
                (":macros", "Show the macro tables"),
                (":define", "Define a word macro: :define WORD REPLACEMENT"),
            ];
            Ok((
                line.len(),
                commands
                    .into_iter()
                    .filter(|it| it.0.starts_with(line))
                    .map(|it| (it.0.split_at(line.len()).1, it.1))
                    .map(|it| CompleteCandidate::Command(it.0.to_owned(), it.1.to_owned()))
                    .collect(),
            ))
        } else {
            let word = line
                .rsplit(|c: char| c.is_whitespace() || c == '(' || c == ')')
                .next()
                .unwrap_or("");
            Ok((
                line.len(),
                self.cfg
                    .macros
                    .words()
                    .map(|(name, _)| name)
                    .filter(|name| !word.is_empty() && name.starts_with(word))
                    .map(|name| name.split_at(word.len()).1)
                    .map(|it| CompleteCandidate::Macro(it.to_owned()))
                    .collect(),
            ))
        }
    }
}

impl Validator for REPLHelper {}

impl Hinter for REPLHelper {}

impl Highlighter for REPLHelper {}

impl REPL {
    fn new(cfg: Config) -> REPL {
        let history_file = dirs::home_dir()
            .map(|mut path| {
                path.push(".annot-history");
                path.to_str().map(|s| s.to_owned())
            })
            .flatten();

        let mut repl = REPL {
            rl: Editor::<REPLHelper>::new(),
            history_file,
            repl_run: true,
            prompt: "annot> ".to_owned(),
            multiline: false,
            multiline_buffer: Vec::new(),
        };

        if let Some(ref path) = repl.history_file {
            let _ = repl.rl.load_history(path);
        }

        repl.rl.set_helper(Some(REPLHelper { cfg }));
        repl
    }

    fn start(&mut self) {
        while self.repl_run {
            let readline = self.rl.readline(self.prompt.as_str());
            match readline {
                Ok(line) => {
                    if line.starts_with(":") {
                        self.process_command(line);
                        continue;
                    }

                    match self.multiline {
                        true => self.multiline_buffer.push(line),
                        _ => self.run_code(line),
                    }
                }

                Err(ReadlineError::Interrupted) => (),
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    eprintln!("{}", format!("ReadlineError: {:?}", err).red());
                    break;
                }
            }
        }
    }

    fn process_command(&mut self, line: String) {
        let mut words = line.split_whitespace();
        match words.next().unwrap_or("") {
            ":{" => {
                self.multiline = true;
                self.prompt = "annot| ".to_owned();
            }

            ":}" => {
                self.multiline = false;
                self.prompt = "annot> ".to_owned();
                let line = self.multiline_buffer.join("\n");
                self.multiline_buffer.clear();
                self.run_code(line);
            }

            ":q" => {
                self.repl_run = false;
            }

            ":macros" => {
                if let Some(helper) = self.rl.helper() {
                    let macros = &helper.cfg.macros;
                    println!("Words:");
                    macros
                        .words()
                        .for_each(|(k, v)| println!("- {} => {}", k, v));
                    println!();
                    println!("Prefixes:");
                    macros
                        .prefixes()
                        .for_each(|(k, v)| println!("- {} => {}", k, v));
                    println!();
                    println!("Postfixes:");
                    macros
                        .postfixes()
                        .for_each(|(k, v)| println!("- {} => {}", k, v));
                    println!();
                }
            }

            ":define" => match (words.next(), words.next()) {
                (Some(word), Some(replacement)) => {
                    if let Some(helper) = self.rl.helper_mut() {
                        if let Some(warning) = helper.cfg.macros.define_word(word, replacement) {
                            eprintln!("{}", warning.to_string().yellow());
                        }
                    }
                }
                _ => eprintln!("{}", "REPL: usage: :define WORD REPLACEMENT".red()),
            },

            _ => eprintln!("{}", format!("REPL: Unknown command {}", line).red()),
        }
    }

    fn run_code(&mut self, line: String) {
        self.rl.add_history_entry(line.as_str());
        if let Some(helper) = self.rl.helper() {
            run_source(&helper.cfg, "<stdin>", line.as_str());
        }
    }
}

impl Drop for REPL {
    fn drop(&mut self) {
        if let Some(ref path) = self.history_file {
            let _ = self.rl.save_history(path);
        }
    }
}

/// Reads, annotates and prints every form of `input`. A form that fails
/// to annotate is reported and skipped. Returns false if anything failed.
fn run_source(cfg: &Config, file: &str, input: &str) -> bool {
    let forms = match Reader::new(input, &cfg.macros).read_all() {
        Ok(forms) => forms,
        Err(err) => {
            eprintln!("{}", format!("{}:{}", file, err).red());
            return false;
        }
    };

    let mut ok = true;
    for form in forms {
        if cfg.dump_form {
            match print_form(cfg.print_mode, &form) {
                Ok(text) => eprintln!("{}", text.dimmed()),
                Err(err) => eprintln!("{}", err.to_string().red()),
            }
        }

        let ast = match annotate(form) {
            Ok(ast) => ast,
            Err(err) => {
                eprintln!("{}", err.with_path(file).to_string().red());
                ok = false;
                continue;
            }
        };

        if cfg.dump_ast {
            eprintln!("{}", format!("{:#?}", ast).dimmed());
        }

        match print_annot(cfg.print_mode, &ast) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                ok = false;
            }
        }
    }
    ok
}

pub(crate) fn cli_main(cfg: Config, input: Option<String>) -> bool {
    if let Some(input) = input {
        match Source::from_file(input.as_str()) {
            Ok(source) => run_source(&cfg, source.name.as_str(), source.text.as_str()),
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                false
            }
        }
    } else {
        let mut repl = REPL::new(cfg);
        repl.start();
        true
    }
}
