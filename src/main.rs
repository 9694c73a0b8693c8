use changeset_loader::{cli, ui::output};

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
