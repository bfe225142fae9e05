// cppcond: parse C preprocessor conditions into propositional formulas

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use rustc_hash::FxHashSet;

use cppcond::interpreter::{BooleanConditionParser, NonBooleanConditionParser};
use cppcond::settings::{InvalidConditionHandling, ParsingSettings};

#[derive(Parser)]
#[command(name = "cppcond")]
#[command(about = "Parse the conditions of #if/#elif directives into formulas.")]
#[command(version)]
struct Cli {
    /// Conditions to parse; read one per line from stdin when omitted
    #[arg(value_name = "EXPRESSION")]
    expressions: Vec<String>,

    /// Expand IS_ENABLED, IS_MODULE and IS_BUILTIN
    #[arg(long = "linux-macros")]
    linux_macros: bool,

    /// Encode comparisons and bare variables as variables (A == 2 becomes A_eq_2)
    #[arg(long)]
    fuzzy: bool,

    /// What to do with invalid conditions: fail, true or error_variable
    #[arg(long, value_name = "HANDLING")]
    invalid: Option<InvalidConditionHandling>,

    /// Keep literals, unknown macros and arithmetic instead of a Boolean formula
    #[arg(long = "non-boolean")]
    non_boolean: bool,

    /// Print the variable names of each formula instead of the formula
    #[arg(long)]
    variables: bool,

    /// TOML file with parsing settings; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<ParsingSettings, cppcond::settings::SettingsError> {
        let mut settings = match &self.config {
            Some(path) => ParsingSettings::load_from_toml(path)?,
            None => ParsingSettings::default(),
        };
        settings.handle_linux_macros |= self.linux_macros;
        settings.fuzzy_parsing |= self.fuzzy;
        if let Some(invalid) = self.invalid {
            settings.invalid_condition = invalid;
        }
        Ok(settings)
    }
}

fn render_variables(names: FxHashSet<String>) -> String {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();
    names.join(" ")
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cppcond=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            return ExitCode::FAILURE;
        }
    };

    let expressions: Vec<String> = if cli.expressions.is_empty() {
        match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
            Ok(lines) => lines.into_iter().filter(|line| !line.trim().is_empty()).collect(),
            Err(e) => {
                eprintln!("{}", format!("Error: Failed to read stdin: {}", e).red());
                return ExitCode::FAILURE;
            }
        }
    } else {
        cli.expressions.clone()
    };

    let boolean = BooleanConditionParser::from_settings(&settings);
    let non_boolean = NonBooleanConditionParser::from_settings(&settings);

    let mut failed = false;
    for expression in &expressions {
        let output = if cli.non_boolean {
            non_boolean.parse(expression).map(|formula| {
                if cli.variables {
                    render_variables(formula.variables())
                } else {
                    formula.to_string()
                }
            })
        } else {
            boolean.parse(expression).map(|formula| {
                if cli.variables {
                    render_variables(formula.variables())
                } else {
                    formula.to_string()
                }
            })
        };

        match output {
            Ok(text) => println!("{}", text),
            Err(e) => {
                failed = true;
                eprintln!("{}", format!("Error: {}", e).red());
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
