//! Examples for using the Aisle Server API

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Recommend products for a basket
    println!("2. Recommend for a Basket:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/recommend"))
        .json(&json!({
            "cluster": 1,
            "basket": ["milk", "bread", "buter"],
            "count": 5
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Recommend with the server's default count
    println!("3. Recommend with Default Count:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/recommend"))
        .json(&json!({
            "cluster": 1,
            "basket": ["eggs"]
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: Preview how a basket resolves
    println!("4. Resolve Preview:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/resolve"))
        .json(&json!({
            "basket": ["mikl", "soda", "granola bar"]
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 5: Inventory stats
    println!("5. Inventory Stats:");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/stats"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    Ok(())
}
