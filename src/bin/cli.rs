//! redwire CLI Client
//!
//! Command-line interface for talking to a RESP key/value server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use redwire::{Connection, Result};

/// redwire CLI
#[derive(Parser, Debug)]
#[command(name = "redwire-cli")]
#[command(about = "CLI for RESP key-value servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 6379)]
    port: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key to a value
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Increment an integer key
    Incr {
        /// The key to increment
        key: String,
    },

    /// Ping the server
    Ping,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redwire=info"));

    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut conn = Connection::connect(&args.host, args.port)?;

    match args.command {
        Commands::Get { key } => match conn.get(key.as_str())? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Commands::Set { key, value } => {
            conn.set(key.as_str(), value.as_str())?;
            println!("OK");
        }
        Commands::Del { key } => println!("{}", conn.del(key.as_str())?),
        Commands::Incr { key } => println!("{}", conn.incr(key.as_str())?),
        Commands::Ping => {
            conn.ping()?;
            println!("PONG");
        }
    }

    conn.close();
    Ok(())
}
