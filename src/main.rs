// minijava: MiniJava lexer, parser and syntax tree viewer

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minijava::parser::lexer;
use minijava::parser::{parse, ErrorPolicy};
use minijava::printer::print_program;
use minijava::ui::App;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// MiniJava source file
    file: PathBuf,

    /// Print the token stream and lexical errors, then exit
    #[arg(long)]
    tokens: bool,

    /// Pretty-print the syntax tree (or the diagnostics), then exit
    #[arg(long)]
    print: bool,

    /// Keep parsing after a syntax error and report every problem
    #[arg(long)]
    recover: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    if !args.file.exists() {
        eprintln!("Error: File '{}' not found", args.file.display());
        std::process::exit(1);
    }

    let source = fs::read_to_string(&args.file)?;
    let policy = if args.recover {
        ErrorPolicy::Recover
    } else {
        ErrorPolicy::FailFast
    };

    if args.tokens || args.print {
        let mut ok = true;
        if args.tokens {
            ok &= dump_tokens(&source);
        }
        if args.print {
            ok &= dump_tree(&source, policy);
        }
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source, policy);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Print one token per line. Returns false if the lexer reported anything.
fn dump_tokens(source: &str) -> bool {
    let lexed = lexer::tokenize(source);
    for token in &lexed.tokens {
        println!(
            "{}:{} {:?} {:?}",
            token.location.line, token.location.column, token.kind, token.text
        );
    }
    for error in &lexed.errors {
        eprintln!("{}", error);
    }
    lexed.errors.is_empty()
}

fn dump_tree(source: &str, policy: ErrorPolicy) -> bool {
    match parse(source, policy) {
        Ok(program) => {
            print!("{}", print_program(&program));
            true
        }
        Err(diagnostics) => {
            for (_, message) in diagnostics.entries() {
                eprintln!("{}", message);
            }
            false
        }
    }
}
