//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI 3.0 specification for the dream journal API
//! and saves it to a file named `openapi.json`.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const OUTPUT_PATH: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(OUTPUT_PATH, spec_json)?;
    println!("OpenAPI specification written to {}", OUTPUT_PATH);
    Ok(())
}
