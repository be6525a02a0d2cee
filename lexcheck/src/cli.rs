use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "lexcheck", about = "Lex every Drizzle source under a directory")]
pub struct Cli {
    /// Directory (or single file) to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Print every diagnostic, not only the failing files
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
