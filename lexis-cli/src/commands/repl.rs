use anyhow::Result;
use lexis::Engine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::cli::{Cli, ReplCommand};
use crate::context;
use crate::output;

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Action<'a> {
    Skip,
    Help,
    Quit,
    Query(&'a str),
}

fn parse_line(line: &str) -> Action<'_> {
    let line = line.trim();
    if line.is_empty() {
        Action::Skip
    } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        Action::Quit
    } else if line.eq_ignore_ascii_case("help") {
        Action::Help
    } else {
        Action::Query(line)
    }
}

/// Run the interactive query loop.
pub fn run(cli: &Cli, cmd: &ReplCommand) -> Result<()> {
    let engine = context::open_engine(cli)?;
    let mut rl = DefaultEditor::new()?;

    println!(
        "Lexis REPL: {} documents, fields {}. Type 'field:query', 'help' or 'quit'.",
        engine.snapshot().doc_count(),
        engine.snapshot().field_names().join(", ")
    );

    loop {
        let line = match rl.readline("lexis> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        };

        match parse_line(&line) {
            Action::Skip => continue,
            Action::Quit => break,
            Action::Help => print_help(),
            Action::Query(query) => {
                let _ = rl.add_history_entry(query);
                if let Err(e) = handle_query(&engine, cli, cmd, query) {
                    eprintln!("Error: {e:#}");
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn handle_query(engine: &Engine, cli: &Cli, cmd: &ReplCommand, query: &str) -> Result<()> {
    let hits = engine.query_str(query, cmd.limit, !cmd.no_explain)?;
    output::print_search_results(&hits, &cli.title_field, cli.format)
}

fn print_help() {
    println!(
        "\
Enter a query as <field>:<words>, for example:
  contenuto:riunione
  contenuto:il direttore ha sottolineato
  titolo:\"Dimenticanze e Priorità\"
Several words form an exact phrase. Type 'quit' or 'exit' to leave."
    );
}
