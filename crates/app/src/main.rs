use anyhow::Context;
use app::config::{Cli, Command, init_tracing};
use app::{router, seed};
use clap::Parser;
use services::AppServices;
use tokio::net::TcpListener;
use tracing::{info, warn};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let services = AppServices::new_sqlite(&cli.db, cli.page_size)
        .await
        .with_context(|| format!("opening {}", cli.db))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let listener = TcpListener::bind(cli.bind)
                .await
                .with_context(|| format!("binding {}", cli.bind))?;
            info!(addr = %cli.bind, db = %cli.db, page_size = cli.page_size, "listening");
            axum::serve(listener, router(services))
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("server error")?;
        }
        Command::Seed => {
            let report = seed::seed(&services).await?;
            println!("{report}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
