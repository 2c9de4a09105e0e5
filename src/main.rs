use anyhow::Result;
use clap::Parser;
use sheet_splitter::{CliArgs, cli};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    cli::init_tracing(args.quiet);
    let compact = args.compact;

    match cli::run(args).await {
        Ok(report) => {
            if let Err(error) = cli::output::emit_value(&report, compact) {
                emit_error_and_exit(error);
            }
            Ok(())
        }
        Err(error) => emit_error_and_exit(error),
    }
}

fn emit_error_and_exit(error: anyhow::Error) -> ! {
    let envelope = cli::errors::envelope_for(&error);
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    if serde_json::to_writer(&mut handle, &envelope).is_err() {
        eprintln!("{{\"code\":\"COMMAND_FAILED\",\"message\":\"{}\"}}", error);
    } else {
        use std::io::Write;
        let _ = handle.write_all(b"\n");
    }
    std::process::exit(1)
}
