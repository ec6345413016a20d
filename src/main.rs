use clap::Parser;
use miette::Result;
use xqc::cli::{load_config, Cli, Commands};
use xqc::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);
    let config_dir = cli.config.as_deref();

    match cli.command {
        Commands::New(args) => xqc::cli::new::run(args, &load_config(config_dir)?, &printer)?,
        Commands::Convert(args) => xqc::cli::convert::run(args, &load_config(config_dir)?, &printer)?,
        Commands::Replay(args) => xqc::cli::replay::run(args, &load_config(config_dir)?, &printer)?,
        Commands::Info(args) => xqc::cli::info::run(args, &printer)?,
        Commands::Completions(args) => xqc::cli::completions::run(args)?,
    }

    Ok(())
}
