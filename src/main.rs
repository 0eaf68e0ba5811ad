#![forbid(unsafe_code)]

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use dynamo_export::{Cli, ExportError, ExportResult, export_cmd};

fn init_tracing(verbose: bool) {
    let env = std::env::var("DYNAMO_EXPORT_LOG").unwrap_or_else(|_| {
        if verbose { "dynamo_export=debug".to_string() } else { "dynamo_export=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn failure_message(e: &ExportError) -> String {
    format!("Error exporting data: {e:#}")
}

fn run(cli: Cli) -> ExportResult<()> {
    let params = cli.params()?;

    // One thread drives the whole pipeline; pages are fetched strictly in sequence.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExportError::Message(format!("failed to start runtime: {e}")))?;

    runtime.block_on(export_cmd::run(params, cli.json))?;
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {}
        Err(ExportError::Config(message)) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefix() {
        let e = ExportError::Scan { table: "MyTable".into(), message: "throttled".into() };
        assert_eq!(
            failure_message(&e),
            "Error exporting data: scan of table 'MyTable' failed: throttled"
        );
    }
}
