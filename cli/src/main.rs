use bonnet_cli::app;
use bonnet_cli::commands::cli::Args;
use bonnet_cli::logging::init_tracing;
use bonnet_core::api::{ConfigError, LaunchError};
use clap::Parser;

fn main() {
    let exit = match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

fn real_main() -> Result<i32, LaunchError> {
    let args = Args::parse();
    let cfg = app::resolve_config(&args)?;
    init_tracing(&cfg.logging)
        .map_err(|e| ConfigError::Invalid(format!("logging.level: {e}")))?;

    // The UI owns the main thread; the backend watcher and output pumps run here.
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let exit = app::run_app_with_config(&args, cfg, &rt)?;
    rt.shutdown_timeout(std::time::Duration::from_secs(1));
    Ok(exit)
}

fn exit_code_for_error(e: &LaunchError) -> i32 {
    // 0: success
    // 1: io / runtime
    // 2: config error
    // 3: ui construction failed
    match e {
        LaunchError::Config(_) => 2,
        LaunchError::Ui(_) => 3,
        LaunchError::Io(_) => 1,
        LaunchError::Runtime(_) => 1,
    }
}
