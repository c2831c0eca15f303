//! Command-line front end for the token reader

use anyhow::Context;
use clap::{ArgGroup, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rftoken::{Device, TokenId};
use rftoken_transport::SerialPortType;

#[derive(Parser)]
#[command(name = "rftoken", version)]
#[command(about = "Read and write RFID tokens over a serial reader", long_about = None)]
#[command(group(ArgGroup::new("action").args(["read", "write", "info"])))]
struct Cli {
    /// Read token
    #[arg(short, long)]
    read: bool,

    /// Write token
    #[arg(short, long)]
    write: bool,

    /// Reader information
    #[arg(short, long)]
    info: bool,

    /// View serial communication devices
    #[arg(short, long)]
    serial: bool,

    /// Trace serial commands
    #[arg(short, long)]
    verbose: bool,

    /// (write only) token data as hex pairs
    #[arg(short, long, value_name = "HEX")]
    data: Option<String>,

    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = 38_400)]
    baud: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.serial {
        list_ports()?;
    }

    if !(cli.read || cli.write || cli.info) {
        if cli.serial {
            return Ok(());
        }
        usage_exit();
    }

    if cli.write && cli.data.is_none() {
        usage_exit();
    }

    run(cli).await
}

fn usage_exit() -> ! {
    let mut cmd = Cli::command();
    let _ = cmd.print_help();
    std::process::exit(1);
}

fn list_ports() -> anyhow::Result<()> {
    let ports = rftoken_transport::available_ports()?;

    println!("{} Default ports {}", "=".repeat(28), "=".repeat(28));
    for port in ports {
        match port.port_type {
            SerialPortType::UsbPort(usb) => println!(
                "{} - {}",
                port.port_name,
                usb.product.unwrap_or_else(|| "USB serial device".into())
            ),
            _ => println!("{}", port.port_name),
        }
    }
    println!("{}\n", "=".repeat(71));

    Ok(())
}

/// The reader usually sits on a /dev tty; accept the bare device name too.
fn normalize_port(port: &str) -> String {
    if port.contains('/') {
        port.to_string()
    } else {
        format!("/dev/{port}")
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut device = Device::new(normalize_port(&cli.port), cli.baud);
    device.connect().await.context("failed to open the reader")?;

    if cli.info {
        let info = device.get_info().await?;
        println!("{info}");
    } else if cli.read {
        match device.read_token().await? {
            Some(token) => println!("Default token - {token}"),
            None => println!("No card present"),
        }
    } else if cli.write {
        // Presence was checked before opening the port.
        let data = cli.data.as_deref().unwrap_or_default();
        let token: TokenId = data.parse().context("invalid token data")?;

        device.write_token_reserve(&token, false).await?;
        println!("Write token {token} successfully.");
    }

    device.disconnect().await?;

    Ok(())
}
