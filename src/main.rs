use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use chiron::response::GREETING;
use chiron::{run_line, Config, OutputMode, Response, Storage, TaskList};

const LINE: &str = "____________________________________________________________";

#[derive(Parser, Debug)]
#[command(author, version, about = "A personal task tracker that reads commands from stdin", long_about = None)]
struct Cli {
    #[arg(long, env = "CHIRON_DATA", value_name = "PATH", help = "Task file. Defaults to data/chiron.txt in the working directory.")]
    data: Option<String>,

    #[arg(long, env = "CHIRON_REJECT_DUPLICATES", help = "Refuse to add a task identical to an existing one")]
    reject_duplicates: bool,

    #[arg(long, help = "Write each response as a JSON line instead of text")]
    json: bool,

    #[arg(long, short = 'v', conflicts_with = "quiet", help = "Log debug output to stderr")]
    verbose: bool,

    #[arg(long, short = 'q', help = "Only log errors")]
    quiet: bool,
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("CHIRON_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn emit(out: &mut impl Write, mode: OutputMode, response: &Response) -> anyhow::Result<()> {
    match mode {
        OutputMode::Text => writeln!(out, "{}\n{}\n{}", LINE, response.render(), LINE)?,
        OutputMode::Json => writeln!(out, "{}", serde_json::to_string(response)?)?,
    }
    out.flush().context("failed to flush stdout")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = Config::new(cli.data.as_deref(), cli.reject_duplicates, cli.json);
    let storage = Storage::new(&config.data_file);
    let mut greeting = Response::new(GREETING);
    let loaded = match storage.load() {
        Ok(loaded) => {
            if loaded.skipped > 0 {
                warn!(skipped = loaded.skipped, "some task lines could not be read");
                greeting = greeting.with_warning(format!(
                    "Skipped {} corrupted line(s) in {}.",
                    loaded.skipped,
                    storage.path().display()
                ));
            }
            loaded.tasks
        }
        Err(e) => {
            warn!(error = %e, "starting with an empty task list");
            greeting = greeting.with_warning(format!("{}. Starting with an empty list.", e));
            Vec::new()
        }
    };
    let mut tasks = TaskList::with_tasks(loaded, config.duplicates);

    let mut out = io::stdout().lock();
    emit(&mut out, config.output, &greeting)?;

    let mut input = io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read from stdin")?;
        if read == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD rather than ending the session.
        let line = String::from_utf8_lossy(&buf);
        let response = run_line(&line, &mut tasks, &storage);
        emit(&mut out, config.output, &response)?;
        if !response.keep_running {
            return Ok(());
        }
    }
    info!("input closed, ending session");
    Ok(())
}
