//! Fetch and print park and ride facilities.

use hamburg_urban_data::{QueryOptions, UrbanDataClient, UrbanDataClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = UrbanDataClient::new(UrbanDataClientConfig::default());
    let spots = client.park_and_rides(&QueryOptions { limit: 10 }).await?;

    println!("{} park and ride facilities", spots.len());
    for spot in spots {
        let availability = spot
            .availability_pct
            .map_or_else(|| "n/a".to_string(), |pct| format!("{pct}%"));
        println!(
            "{}: {} free of {} ({availability})",
            spot.name, spot.free_space, spot.capacity
        );
    }
    Ok(())
}
