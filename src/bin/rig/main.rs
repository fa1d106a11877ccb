//! Rig CLI - composes bundler configurations from presets

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rigging::core::environment::Command;
use rigging::{GlobalContext, PresetError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut ctx = match GlobalContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    if let Err(e) = run(&ctx, cli.command) {
        match e.downcast_ref::<PresetError>() {
            Some(err) => ctx.emit(&ctx.diagnostic(err)),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    // Logs go to stderr; stdout carries the composed configuration.
    let filter = if cli.verbose {
        EnvFilter::new("rigging=debug")
    } else {
        EnvFilter::new("rigging=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();
}

fn run(ctx: &GlobalContext, command: Commands) -> Result<()> {
    match command {
        Commands::Build(args) => commands::compose::execute(ctx, Command::Build, args),
        Commands::Start(args) => commands::compose::execute(ctx, Command::Start, args),
        Commands::Test(args) => commands::compose::execute(ctx, Command::Test, args),
        Commands::List(args) => commands::list::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
