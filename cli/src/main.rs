use clap::Parser;
use nutriscan_core::{
    application::create_service,
    domain::{authentication::ports::AuthService, common::NutriConfig},
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;
mod render;

use args::Args;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,nutriscan_core=info,nutriscan=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log.json);

    let command = args.command.clone();
    let service = create_service(NutriConfig::from(args)).await?;

    match service.restore_session().await {
        Some(session) => info!(user_id = %session.user.id, "session restored"),
        None => debug!("no session to restore"),
    }

    let mut stdout = std::io::stdout();
    if let Err(e) = commands::run(&service, command, &mut stdout).await {
        eprintln!("{}", render::notice(&e));
        std::process::exit(1);
    }

    Ok(())
}
