use std::path::PathBuf;

use clap::Parser;
use imposter::cli::TuiApp;
use imposter::game::{Catalog, Session};
use imposter::storage::{JsonFileStore, SettingsRepo};

#[derive(Debug, Parser, Clone)]
#[command(name = "imposter-play")]
#[command(about = "Pass-and-play Imposter word game for one device")]
struct Args {
    /// Random seed for reproducibility; omit for a fresh shuffle each run
    #[arg(long)]
    seed: Option<u64>,

    /// Where settings and custom word lists are saved
    #[arg(long, default_value = "imposter-settings.json")]
    data_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    let repo = SettingsRepo::new(JsonFileStore::open(&args.data_file));
    let settings = repo.load_settings();
    let catalog = Catalog::new(repo.load_custom_categories());
    let seed = args.seed.unwrap_or_else(rand::random);

    let session = Session::new(settings, catalog, seed);
    let mut app = TuiApp::new(session, repo);
    if let Err(err) = app.run() {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
