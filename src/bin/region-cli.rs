use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "region-cli")]
#[command(about = "Client for the region check service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a point and radius for evaluation
    Check {
        #[arg(short, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, allow_negative_numbers = true)]
        y: f64,
        #[arg(short, allow_negative_numbers = true)]
        r: f64,
        /// Send parameters as a form body or a query string
        #[arg(short, long, value_enum, default_value_t = Method::Post)]
        method: Method,
    },
    /// Check service liveness
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Get,
    Post,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Check { x, y, r, method } => {
            let params = [("x", x.to_string()), ("y", y.to_string()), ("r", r.to_string())];
            let endpoint = format!("{}/calculate", cli.url);
            match method {
                Method::Get => client.get(endpoint).query(&params).send().await?,
                Method::Post => client.post(endpoint).form(&params).send().await?,
            }
        }
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }
    Ok(())
}
