use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use fspl_drv::{run, Config, EmitKind};
use tracing_subscriber::EnvFilter;

/// `fsplc` — compiles one FSPL source file to LLVM-style IR text.
#[derive(ClapParser, Debug)]
#[command(name = "fsplc", about = "FSPL compiler front-end")]
struct Cli {
    /// Source file to compile.
    input: PathBuf,

    /// Where to write the result; stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the raw token stream instead of compiling to IR.
    #[arg(long)]
    emit_tokens: bool,

    #[arg(short, long)]
    verbose: bool,

    /// Fail the build if any warning was reported.
    #[arg(short = 'W', long = "warnings-as-errors")]
    warnings_as_errors: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut config = Config::new(cli.input);
        config.output_file = cli.output;
        config.emit = if cli.emit_tokens { EmitKind::Tokens } else { EmitKind::Ir };
        config.verbose = cli.verbose;
        config.warnings_as_errors = cli.warnings_as_errors;
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fsplc: {e}");
            ExitCode::from(1)
        }
    }
}
