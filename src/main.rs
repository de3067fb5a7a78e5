use miette::Result;
use tessera::cli::{normalize_args, Cli};
use tessera::output::Printer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tessera=warn".into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let cli = <Cli as clap::Parser>::parse_from(normalize_args(std::env::args_os()));
    let printer = Printer::new().with_quiet(cli.quiet);

    tessera::cli::run(cli, &printer)?;

    Ok(())
}
