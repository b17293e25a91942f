pub mod cli;
pub mod config;

use clap::{App, Arg, ArgMatches};
use colored::Colorize;
use lang::codegen::PrintMode;

use crate::config::{Config, ConfigError};

fn main() {
    let args = App::new("annot")
        .version("0.1.0")
        .author("Kiva <imkiva@icloud.com>")
        .about("Reads parenthesized source and prints its annotated AST")
        .args_from_usage(
            "-i, --repl          'Starts an interactive shell'
            --allow-redefine     'Redefines word macros without a warning'
            --dump-form          'Prints every raw form before annotating it'
            --dump-ast           'Prints the debug view of every AST'
            --html               'Prints in HTML mode'
            [INPUT]              'File to read'",
        )
        .arg(
            Arg::from_usage("-D, --define [MACRO]... 'Adds a word macro WORD=REPLACEMENT'")
                .number_of_values(1),
        )
        .arg(
            Arg::from_usage("--prefix [MACRO]... 'Adds a prefix macro C=REPLACEMENT'")
                .number_of_values(1),
        )
        .arg(
            Arg::from_usage("--postfix [MACRO]... 'Adds a postfix macro C=REPLACEMENT'")
                .number_of_values(1),
        )
        .get_matches();

    let cfg = match configure(&args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(2);
        }
    };

    let input = match args.is_present("repl") {
        true => None,
        false => args.value_of("INPUT").map(|e| e.to_owned()),
    };
    if !cli::cli_main::cli_main(cfg, input) {
        std::process::exit(1);
    }
}

fn configure(args: &ArgMatches) -> Result<Config, ConfigError> {
    let mut cfg = Config::new();
    cfg.macros.allow_redefine = args.is_present("allow-redefine");
    cfg.dump_form = args.is_present("dump-form");
    cfg.dump_ast = args.is_present("dump-ast");
    if args.is_present("html") {
        cfg.print_mode = PrintMode::Html;
    }

    let warnings = cfg.define_words(args.values_of("define").into_iter().flatten())?;
    for warning in warnings {
        eprintln!("{}", warning.to_string().yellow());
    }
    cfg.define_prefixes(args.values_of("prefix").into_iter().flatten())?;
    cfg.define_postfixes(args.values_of("postfix").into_iter().flatten())?;
    Ok(cfg)
}
