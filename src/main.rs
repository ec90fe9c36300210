use color_eyre::Result;
use lexa::cli::{self, parse_args, USAGE};
use lexa::config::ClientConfig;
use lexa::logging;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.url {
        config = config.with_base_url(url);
    }
    logging::init(&config.log_filter);

    cli::run(args.command, config).await
}
