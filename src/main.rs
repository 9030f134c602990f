use anyhow::Result;
use clap::Parser;
use tracing::info;

use fevga_bei::BeiServer;
use fevga_core::{Player, Variant};
use fevga_engine::eval::pseudo_pips;

/// Backgammon, Acey-Deucey, and Tabula move analyzer speaking the BEI
/// protocol.
#[derive(Parser)]
#[command(name = "fevga", version)]
struct Args {
    /// Listen on this TCP address and serve BEI (for example 127.0.0.1:1337).
    #[arg(long, value_name = "ADDRESS")]
    bei: Option<String>,

    /// Print the pseudo-pip table as markdown and exit.
    #[arg(long)]
    pips: bool,

    /// Log analyzed boards and analysis throughput.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.pips {
        print_pips_table();
        return Ok(());
    }

    if let Some(address) = args.bei {
        info!("fevga starting");
        BeiServer::new().listen(&address)?;
        return Ok(());
    }

    println!("nothing to do: pass --bei <ADDRESS> to serve or --pips for the table");
    Ok(())
}

fn print_pips_table() {
    println!("| Space | Pseudo-pips |");
    println!("| --- | --- |");
    for space in 1..=25 {
        println!(
            "| {space} | {} |",
            pseudo_pips(Player::One, space, Variant::Backgammon)
        );
    }
}
