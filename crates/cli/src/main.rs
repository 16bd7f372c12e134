use catalog_sheets_core::ports::command_handler::CommandHandler;
use catalog_sheets_core::ports::routine::StopFlag;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod cli_adapter;
mod prettyprint;

use application_service_factory::ApplicationServiceFactory;
use cli_adapter::{Cli, CliAdapter};
use prettyprint::PrettyFormatter;

const LOG_FILE: &str = "catalog_sheets.log";
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Stop,
    ForceQuit,
}

/// First Ctrl-C asks the routine to stop between worksheets; a second one
/// quits immediately.
fn on_interrupt(stop: &StopFlag) -> Interrupt {
    if stop.is_stop_requested() {
        Interrupt::ForceQuit
    } else {
        stop.request_stop();
        Interrupt::Stop
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_tracing()?;
    setup_panic_hook();

    info!("Starting catalog-sheets CLI");

    let stop = StopFlag::new();
    tokio::spawn({
        let stop = stop.clone();
        async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match on_interrupt(&stop) {
                    Interrupt::Stop => {
                        warn!("Stop requested; finishing the current worksheet (Ctrl-C again to quit now)")
                    }
                    Interrupt::ForceQuit => {
                        error!("Interrupted twice; quitting without finishing");
                        std::process::exit(EXIT_INTERRUPTED);
                    }
                }
            }
        }
    });

    let app_service = ApplicationServiceFactory::create().await.map_err(|report| {
        error!("Startup failed: {:?}", report);
        format!("Startup failed: {}", report.current_context())
    })?;
    let cli_adapter = CliAdapter::new(app_service, stop);

    match cli_adapter.handle(cli.into_command()).await {
        Ok(output) => {
            println!("{}", output);
            info!("CLI execution completed successfully");
            Ok(())
        }
        Err(report) => {
            error!("CLI execution failed: {:?}", report);
            Err(format!("Command failed: {}", report.current_context()).into())
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let indicatif_layer = IndicatifLayer::new();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("catalog_sheets", tracing::Level::TRACE)
                .with_target("catalog_sheets_core", tracing::Level::TRACE),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
