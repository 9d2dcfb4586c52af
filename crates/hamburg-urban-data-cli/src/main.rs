//! # Hamburg Urban Data CLI
//!
//! Command-line utility for querying the parking datasets.

use std::env;

use anyhow::Result;
use hamburg_urban_data::{
    GarageQueryOptions, QueryOptions, UrbanDataClient, UrbanDataClientConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let limit = args
        .get(2)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(10);
    let client = UrbanDataClient::new(UrbanDataClientConfig::default());

    match args[1].as_str() {
        "disabled-parkings" => {
            let spots = client.disabled_parkings(&QueryOptions { limit }).await?;
            for spot in spots {
                println!(
                    "{}\t{}\t{} spots",
                    spot.spot_id,
                    spot.street.as_deref().unwrap_or("-"),
                    spot.number
                );
            }
        }
        "park-and-rides" => {
            let spots = client.park_and_rides(&QueryOptions { limit }).await?;
            for spot in spots {
                println!(
                    "{}\t{} free of {}",
                    spot.name, spot.free_space, spot.capacity
                );
            }
        }
        "garages" => {
            let filter = args.get(3).cloned();
            let garages = client.garages(&GarageQueryOptions { limit, filter }).await?;
            for garage in garages {
                println!("{}\t{:?}", garage.name, garage.status);
            }
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Hamburg Urban Data CLI

USAGE:
    hamburg-urban-data <COMMAND> [LIMIT] [FILTER]

COMMANDS:
    disabled-parkings [limit]          List disabled parking spots
    park-and-rides [limit]             List park and ride facilities
    garages [limit] [filter]           List garages, optionally filtered
    help                               Show this help message

EXAMPLES:
    hamburg-urban-data disabled-parkings 25
    hamburg-urban-data garages 10 "frei>=0"
"#
    );
}
