use std::{
    io::{BufRead, IsTerminal, Write},
    process::ExitCode,
};

use automaton_eval::{prelude::*, show_duration};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("evaluate")
        .about("Loads a finite automaton and classifies words as accepted, rejected or invalid")
        .arg(
            Arg::new("definition")
                .help("file containing the automaton definition")
                .default_value("automaton.txt"),
        )
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .action(ArgAction::Append)
                .help("word to evaluate, may be given repeatedly; words are read from stdin if none is given"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("epsilon")
                .long("epsilon")
                .default_value(DEFAULT_EPSILON)
                .help("token that acts as epsilon marker"),
        )
        .arg(
            Arg::new("epsilon-closure")
                .long("epsilon-closure")
                .action(ArgAction::SetTrue)
                .help("follow epsilon transitions during evaluation"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .action(ArgAction::SetTrue)
                .help("treat words as whitespace separated symbol lists instead of characters"),
        )
        .arg(
            Arg::new("details")
                .long("details")
                .action(ArgAction::SetTrue)
                .help("explain why words are not accepted"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let Ok(Some(verbosity)) = matches.try_get_one::<String>("verbosity") else {
        return;
    };

    let level = match verbosity.as_str() {
        "trace" => filter::LevelFilter::TRACE,
        "debug" => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn options(matches: &ArgMatches) -> EvaluationOptions {
    let mut options = EvaluationOptions::default();
    if matches.get_flag("epsilon-closure") {
        options = options.with_epsilon(EpsilonHandling::Closure);
    }
    if matches.get_flag("tokens") {
        options = options.with_tokenization(Tokenization::Whitespace);
    }
    options
}

/// Reads one word per line from stdin, prompting for them if stdin is a terminal.
fn read_words() -> std::io::Result<Vec<String>> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut words = vec![];
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            eprint!("word to evaluate (end with Ctrl-D): ");
            std::io::stderr().flush()?;
        }
        match lines.next() {
            Some(line) => words.push(line?.trim_end_matches('\r').to_string()),
            None => return Ok(words),
        }
    }
}

fn classify(evaluator: &Evaluator<'_>, words: &[String]) -> Classifications {
    #[cfg(feature = "parallel")]
    {
        evaluator.par_evaluate_batch(words)
    }
    #[cfg(not(feature = "parallel"))]
    {
        evaluator.evaluate_batch(words)
    }
}

#[derive(Tabled)]
struct Row {
    word: String,
    classification: String,
}

#[derive(Tabled)]
struct DetailedRow {
    word: String,
    classification: String,
    reason: String,
    #[tabled(rename = "active states")]
    active: String,
}

fn colored(classification: Classification) -> String {
    match classification {
        Classification::Accepted => classification.green().to_string(),
        Classification::Rejected => classification.yellow().to_string(),
        Classification::Invalid => classification.red().to_string(),
    }
}

fn show_word(word: &str) -> String {
    if word.is_empty() {
        "ε".to_string()
    } else {
        word.to_string()
    }
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let path = matches
        .get_one::<String>("definition")
        .map(String::as_str)
        .unwrap_or("automaton.txt");
    let epsilon = matches
        .get_one::<String>("epsilon")
        .map(String::as_str)
        .unwrap_or(DEFAULT_EPSILON);

    let definition = match DefinitionReader::default().with_epsilon(epsilon).open(path) {
        Ok(definition) => definition,
        Err(e) => {
            error!("could not load {path}: {e}");
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "loaded automaton with {} states and {} transitions from {path}",
        definition.size(),
        definition.transition_relation().len()
    );

    let words: Vec<String> = match matches.get_many::<String>("word") {
        Some(words) => words.cloned().collect(),
        None => match read_words() {
            Ok(words) => words,
            Err(e) => {
                eprintln!("could not read words from stdin: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    debug!("evaluating {} words", words.len());

    let evaluator = definition.evaluator().with_options(options(&matches));
    let start = std::time::Instant::now();
    let table = if matches.get_flag("details") {
        Table::new(words.iter().map(|word| {
            let run = evaluator.run(word);
            DetailedRow {
                word: show_word(word),
                classification: colored(run.classification()),
                reason: run.reason().map(ToString::to_string).unwrap_or_default(),
                active: run
                    .last_active()
                    .map(|set| set.show(&definition))
                    .unwrap_or_default(),
            }
        }))
    } else {
        Table::new(
            classify(&evaluator, &words)
                .into_iter()
                .map(|(word, classification)| Row {
                    word: show_word(&word),
                    classification: colored(classification),
                }),
        )
    };
    info!(
        "evaluated {} words in {}",
        words.len(),
        show_duration(start.elapsed())
    );

    println!("{table}");
    ExitCode::SUCCESS
}
