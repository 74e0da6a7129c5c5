//! Churnboard entrypoint: renders one view, or serves the menu until the user quits

use std::io::{self, BufRead, Write};

use anyhow::Result;
use churnboard::{render_once, Args, DashboardPaths, TerminalSurface, View};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let paths = args.paths();
    let mut surface = TerminalSurface::new(io::stdout().lock(), args.output_dir.clone());

    match args.view {
        Some(view) => render_once(&paths, view, &mut surface),
        None => run_menu(&paths, &mut surface),
    }
}

/// Show the menu until the user quits, reloading every input for each selection
fn run_menu<W: Write>(paths: &DashboardPaths, surface: &mut TerminalSurface<W>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let choice = line.trim();

        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        match View::from_choice(choice) {
            Some(view) => {
                tracing::info!(view = %view, "view selected");
                render_once(paths, view, surface)?;
            }
            None => eprintln!("Unknown selection: {:?}", choice),
        }
    }
}

fn print_menu() -> Result<()> {
    let mut err = io::stderr().lock();
    writeln!(err, "\nProject menu")?;
    for view in View::ALL {
        writeln!(err, "  {}", view)?;
    }
    write!(err, "Select a view (number, or q to quit): ")?;
    err.flush()?;
    Ok(())
}
