use pktanalyzer_cli::{analyze_file, Cli};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logs go to stderr so the reports on stdout stay byte-exact
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    match analyze_file(&cli.file, &cli.report_config()) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(file = %cli.file.display(), "analysis failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
