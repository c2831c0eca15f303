//! Device control example

use rftoken::{Device, LedColor};

#[tokio::main]
async fn main() -> rftoken::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::new(port, 38_400);
    device.connect().await?;

    println!("Reader connected!");

    let info = device.get_info().await?;
    println!("INFO: {info}");

    println!("Beeping...");
    device.beep(5).await?;

    println!("Cycling LED...");
    device.set_led(LedColor::Red).await?;
    device.set_led(LedColor::Green).await?;

    println!("Done!");

    device.disconnect().await?;

    Ok(())
}
