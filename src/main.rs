use std::path::PathBuf;

use clap::Parser;

use ppane::app::App;
use ppane::error::AppResult;

/// Page-by-page PDF pane for the terminal: scroll with the wheel, step with
/// j/k, save a copy with d.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "ppane", version)]
struct Cli {
    /// PDF file to open.
    file: PathBuf,

    /// Offer a save-copy action storing the document under NAME.
    #[arg(long = "save-as", value_name = "NAME")]
    save_as: Option<String>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut app = App::new(cli.file, cli.save_as)?;
    app.run().await
}
