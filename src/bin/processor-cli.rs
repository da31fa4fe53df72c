use clap::{Parser, Subcommand};
use sdk_rust::{ClientError, ProcessorClient};

#[derive(Parser)]
#[command(name = "processor-cli")]
#[command(about = "Command-line client for the data processing service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is up
    Health,
    /// Send text to be processed and print the response envelope
    Process {
        /// Text to process
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ProcessorClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let message = client.health().await?;
            println!("{}", message);
        }
        Commands::Process { data } => match client.process(&data).await {
            Ok(envelope) => println!("{}", serde_json::to_string_pretty(&envelope)?),
            Err(ClientError::Rejected { status, envelope }) => {
                eprintln!("Error: service returned status {}", status);
                eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
