//! wfdeploy - Deploy WAR/EAR archives to WildFly servers and managed domains

use clap::Parser;

use wfdeploy::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
