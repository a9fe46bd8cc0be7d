use clap::Parser;
use symbol_examples::cli::{Cli, run};
use symbol_examples::tracing::{LogFormat, init_with};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Logs go to stderr so stdout stays clean for snippet output.
    init_with(if cli.log_json { LogFormat::Json } else { LogFormat::Compact });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out).inspect_err(|e| {
        tracing::error!("symbol-examples failed: {:?}", e);
    })
}
