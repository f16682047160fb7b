use std::error::Error;

use aisle::{pantry_demo, AisleConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let config = AisleConfig::default();

    let response = pantry_demo(&config)?;

    println!(
        "Outcome {:?} with {} recommendations: {:?}",
        response.outcome,
        response.recommendations.len(),
        response.recommendations
    );

    Ok(())
}
