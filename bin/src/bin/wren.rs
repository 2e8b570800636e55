use clap::Parser;
use wren_bin::{
    cli::{Cli, Command},
    commands::{self, highlight::HighlightArgs},
};
use wren_config::Settings;
use wren_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let _log_guard = wren_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })
    .unwrap_or_else(|e| {
        eprintln!("Error: Failed to initialize logging: {}", e);
        std::process::exit(1);
    });

    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let settings = Settings::load_with_overrides(cli.config.as_deref(), Settings::default_path().as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        });

    let result = match cli.command {
        Command::Highlight {
            file,
            no_lexical,
            no_semantic,
            remember,
        } => commands::highlight::run(
            &file,
            HighlightArgs {
                no_lexical,
                no_semantic,
                line_numbers: false,
            },
            settings,
            settings_path.as_deref(),
            remember,
        ),
        Command::Tokens { file } => commands::tokens::run(&file),
    };

    if let Err(e) = result {
        eprintln!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
