use argh::FromArgs;
use calculator::io_adapters::RustylineConsole;
use calculator::{Interpreter, Options};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Interactive calculator for one binary operation at a time (+, -, *, /).
struct Args {
    #[argh(switch)]
    /// do not print the introduction banner.
    no_intro: bool,

    #[argh(option)]
    /// file to load line history from and save it to on exit.
    history: Option<PathBuf>,

    #[argh(switch, short = 'v')]
    /// log debug events to stderr unless RUST_LOG says otherwise.
    verbose: bool,
}

/// Logs go to stderr so they never interleave with the prompts on stdout.
/// `RUST_LOG` takes precedence over the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    init_tracing(args.verbose);

    let console = RustylineConsole::new(args.history)
        .map_err(|e| anyhow::anyhow!("failed to open the terminal: {}", e))?;
    let options = Options {
        show_intro: !args.no_intro,
    };

    Interpreter::new(console, std::io::stdout(), options).run()
}
