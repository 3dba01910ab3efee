use clap::Parser;
use statement_balances::{aggregate, parse_target_date};

/// Total the payments of one day of a bank statement export, per currency.
#[derive(Parser)]
struct Cli {
    /// Statement export: CSV with a header row
    input: String,
    /// Day to summarize, DD/MM/YYYY
    #[clap(short, long)]
    date: String,
    /// Write CSV instead of a JSON array
    #[clap(long)]
    csv: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let date = parse_target_date(&cli.date)?;
    let input = std::fs::File::open(&cli.input)?;
    let balances = aggregate(input, date)?;

    if cli.csv {
        balances.serialize_csv(std::io::stdout())
    } else {
        balances.serialize_json(std::io::stdout())?;
        println!();
        Ok(())
    }
}
