use cantact::config::{Config, ConfigLoader};
use cantact::logging::init_logging;
use cantact::{Device, DeviceError, Frame};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "cantact",
    version,
    about = "Send and receive CAN frames through a CANtact adapter.",
    long_about = "Talks to a CANtact (or any SLCAN-compatible) USB adapter over its serial port. Settings come from cantact.toml, CANTACT_* environment variables, and the flags below, in increasing order of precedence."
)]
struct Args {
    /// Configuration file to use instead of the standard locations.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Serial port of the adapter, or an alias from the config file.
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// Log level or filter directive (overrides the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Set the CAN bitrate (sends `S<rate>`).
    Bitrate {
        /// Bitrate in bits per second.
        rate: u32,
    },
    /// Enable the bus (sends `O`).
    Open,
    /// Disable the bus (sends `C`).
    Close,
    /// Transmit one frame given as `<id>#<data>`, e.g. `123#ABCD`.
    Send {
        frame: Frame,
    },
    /// Configure the bitrate, open the bus and print received frames.
    Dump {
        /// Stop after this many frames.
        #[arg(short = 'n', long)]
        count: Option<u64>,

        /// Bitrate to configure (defaults to `device.bitrate` from the config).
        #[arg(short, long)]
        bitrate: Option<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => ConfigLoader::load_from(path)?.into_config(),
        None => ConfigLoader::load()?.into_config(),
    };
    if let Some(level) = args.log_level.clone() {
        config.logging.level = level;
    }
    init_logging(&config.logging);

    let port_name = resolve_port(&config, args.port.as_deref())
        .ok_or("no serial port given; pass --port or set device.port in cantact.toml")?;
    let mut device = Device::connect_with(&port_name, config.device.port_configuration())?;
    info!(port = %port_name, "connected");

    match args.command {
        Cmd::Bitrate { rate } => device.set_bitrate(rate)?,
        Cmd::Open => device.open()?,
        Cmd::Close => device.close()?,
        Cmd::Send { frame } => device.write_frame(&frame)?,
        Cmd::Dump { count, bitrate } => {
            device.set_bitrate(bitrate.unwrap_or(config.device.bitrate))?;
            device.open()?;
            let result = dump(&mut device, count);
            if let Err(e) = device.close() {
                warn!("failed to close bus: {e}");
            }
            result?;
        }
    }

    Ok(())
}

fn resolve_port(config: &Config, cli_port: Option<&str>) -> Option<String> {
    cli_port
        .map(str::to_string)
        .or_else(|| config.device.port.clone())
        .map(|name| config.device.resolve_port(&name))
}

/// Print frames until `count` is reached or the transport fails.
/// Undecodable lines are logged and skipped.
fn dump(device: &mut Device, count: Option<u64>) -> Result<(), DeviceError> {
    let mut received = 0u64;
    while count.map_or(true, |limit| received < limit) {
        match device.read_frame() {
            Ok(frame) => {
                println!("{frame}");
                received += 1;
            }
            Err(DeviceError::Codec(e)) => warn!("skipping line: {e}"),
            Err(DeviceError::Transport(e)) => {
                if e.is_disconnect() {
                    error!("adapter disconnected");
                }
                return Err(e.into());
            }
        }
    }
    Ok(())
}
