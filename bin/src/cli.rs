use clap::Parser;
use std::path::PathBuf;

/// Command-line interface configuration
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "WREN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file, or a directory to create one in
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Highlight a Java or Kotlin file and print it with ANSI colors
    Highlight {
        file: PathBuf,

        /// Skip token based highlighting
        #[arg(long)]
        no_lexical: bool,

        /// Skip syntax tree based highlighting
        #[arg(long)]
        no_semantic: bool,

        /// Record the file as last opened in the settings file
        #[arg(long)]
        remember: bool,
    },
    /// Print the token stream of a Java or Kotlin file
    Tokens { file: PathBuf },
}
