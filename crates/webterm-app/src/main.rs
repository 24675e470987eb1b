mod boot;
mod cli;
mod runner;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use webterm_config::WebtermConfig;

fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = webterm_config::load_config(args.config.as_deref());
    let level = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => "info".to_string(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            level.parse().unwrap_or_else(|_| {
                tracing_subscriber::filter::LevelFilter::INFO.into()
            }),
        ))
        .init();

    tracing::info!("webterm v{} starting", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        WebtermConfig::default()
    });

    let mut booted = boot::boot(&config, args.container, Box::new(std::io::stdout()));

    if let Some(path) = &args.prefs {
        if let Err(e) = boot::apply_preferences_file(&mut booted.session, path) {
            tracing::error!("Failed to apply preferences: {e}");
            return ExitCode::FAILURE;
        }
    }
    if let Some(title) = &args.title {
        booted.session.set_window_title(title);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(runner::run(booted, tokio::io::stdin())) {
        Ok(()) => {
            tracing::info!("Session closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Session failed: {e}");
            ExitCode::FAILURE
        }
    }
}
