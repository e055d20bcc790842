mod api;
mod cli;
mod config;
mod console_format;
mod http;
mod matrix;
mod report;
mod runner;
mod types;
mod ui;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match config::build_report_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        ui::print_error(&e);
        std::process::exit(1);
    }
}

/// Fetch, aggregate and write every requested output
fn run(config: &config::ReportConfig) -> Result<(), String> {
    let matrix = runner::build_report(config)?;

    report::write_xlsx_report(&matrix, &config.web_base, &config.output)?;
    ui::status(&format!("spreadsheet saved to {}", config.output.display()));

    if let Some(ref json_path) = config.json_output {
        report::export_json_report(&matrix, &config.repos, &config.web_base, json_path)?;
        ui::status(&format!("JSON report saved to {}", json_path.display()));
    }

    if !config.quiet {
        report::print_summary_table(&matrix, &config.repos)
            .map_err(|e| format!("Failed to print summary: {}", e))?;
    }

    Ok(())
}
