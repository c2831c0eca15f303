//! Token read example

use rftoken::Device;

#[tokio::main]
async fn main() -> rftoken::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::new(port, 38_400);
    device.connect().await?;

    match device.read_token().await? {
        Some(token) => println!("Token: {token}"),
        None => println!("No card present"),
    }

    device.disconnect().await?;

    Ok(())
}
