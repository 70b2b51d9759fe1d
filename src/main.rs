use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use haproxy_collector::{Args, LineEmitter, Poller, logging, runtime};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_file.as_deref());

    let settings = match runtime::load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let fetcher = settings.transport.build_fetcher()?;
    let rt = runtime::build_runtime()?;

    rt.block_on(async move {
        let stop = runtime::spawn_shutdown_handler();

        Poller::new(fetcher, settings.filter, LineEmitter::stdout())
            .with_interval(settings.poll_interval)
            .with_fetch_timeout(settings.fetch_timeout)
            .run(stop)
            .await;
    });

    info!("Collector shutdown complete");
    Ok(())
}
