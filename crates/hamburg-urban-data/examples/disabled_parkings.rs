//! Fetch and print disabled parking spots.

use hamburg_urban_data::{QueryOptions, UrbanDataClient, UrbanDataClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = UrbanDataClient::new(UrbanDataClientConfig::default());
    let spots = client
        .disabled_parkings(&QueryOptions { limit: 10 })
        .await?;

    println!("{} disabled parking spots", spots.len());
    for spot in spots {
        println!(
            "{}: {} ({} spots)",
            spot.spot_id,
            spot.street.as_deref().unwrap_or("unknown street"),
            spot.number
        );
    }
    Ok(())
}
