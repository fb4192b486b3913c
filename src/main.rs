use queens_ga::config::Config;
use queens_ga::evaluation::report::print_report;
use queens_ga::evaluation::runs::run_trials;
use queens_ga::evaluation::statistics::RunStatistics;
use queens_ga::export::{write_export_to_json, TrialExport};
use std::env;
use std::path::Path;
use std::process;

/// Loads the configuration from `path`, falling back to the defaults when the file does not exist.
fn load_config(path: &Path) -> Config {
    if !path.exists() {
        log::info!(
            "No configuration at '{}', using defaults.",
            path.display()
        );
        return Config::default();
    }

    match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Booting queens_ga...");

    // 1. Load and Validate Configuration
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = load_config(Path::new(&config_path));

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        process::exit(1);
    }
    log::info!("Configuration loaded and validated.");

    // 2. Run the trials
    let records = match run_trials(&config.ga, &config.runs) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Evolution failed: {}", e);
            process::exit(1);
        }
    };

    // 3. Report
    let statistics = RunStatistics::from_records(&records);
    print_report(&records, &statistics, config.report.top_champions);

    // 4. Optional export
    if let Some(export_path) = &config.report.export_path {
        let export = TrialExport::new(&config, &records, statistics);
        if let Err(e) = write_export_to_json(&export, Path::new(export_path)) {
            log::error!("Failed to write export: {}", e);
            process::exit(1);
        }
    }
}
