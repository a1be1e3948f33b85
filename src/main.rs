use clap::Parser;
use dbassess::{
    cli::Cli,
    config::Config,
    llm::{CompletionClient, ServingEndpointClient},
    logging::init_logging,
    pipeline::{Pipeline, StopFlag},
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let stop = StopFlag::new();
    stop.install_ctrlc_handler();

    let client = config.serving.as_ref().map(ServingEndpointClient::new);
    if client.is_none() {
        log::info!("Language model sections skipped");
    }

    let pipeline = Pipeline::new(
        &config,
        client.as_ref().map(|c| c as &dyn CompletionClient),
        stop,
    );

    let outcome = pipeline.run()?;

    if !outcome.scan.skipped.is_empty() {
        log::warn!("{} Terraform files were skipped", outcome.scan.skipped.len());
    }

    pipeline.writer().write_summary(&outcome.files)?;

    Ok(())
}
