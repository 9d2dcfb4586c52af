//! Fetch and print garages with live occupancy data.

use hamburg_urban_data::{GarageQueryOptions, UrbanDataClient, UrbanDataClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = UrbanDataClient::new(UrbanDataClientConfig::default());
    let garages = client
        .garages(&GarageQueryOptions {
            limit: 10,
            filter: Some("frei>=0".to_string()),
        })
        .await?;

    println!("{} garages", garages.len());
    for garage in garages {
        println!("{}: {:?}", garage.name, garage.status);
    }
    Ok(())
}
