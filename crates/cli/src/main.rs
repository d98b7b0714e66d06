//! Tidepool CLI - the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in
//! tidepool register marina reef
//! tidepool login marina reef
//!
//! # Shop
//! tidepool add --name "Blue Tang" --price "₱1,250"
//! tidepool cart
//! tidepool checkout
//!
//! # Buy without the cart, skipping the prompt
//! tidepool buy --name Koi --price 1500 --yes
//! ```
//!
//! # Commands
//!
//! - `register` / `login` / `logout` / `whoami` - Accounts
//! - `add` / `remove` / `cart` / `checkout` / `buy` - Cart and purchase
//! - `contact` - Send the contact form
//!
//! Records live in the same JSON data file the storefront server uses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use tidepool_core::PageTarget;
use tidepool_storefront::config::{DEFAULT_DATA_PATH, get_env_or_default};
use tidepool_storefront::services::{ContactClient, ContactForm, Shop};
use tidepool_storefront::store::FileStore;

mod commands;
mod console;

use commands::CommandError;
use console::ConsoleNotifier;

#[derive(Parser)]
#[command(name = "tidepool")]
#[command(author, version, about = "Tidepool storefront from the terminal")]
struct Cli {
    /// JSON file holding the storefront records
    #[arg(long, global = true, env = "TIDEPOOL_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register { username: String, password: String },
    /// Log in
    Login { username: String, password: String },
    /// Log out
    Logout,
    /// Show who is logged in
    Whoami,
    /// Add one unit of a product to the cart
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price label, e.g. "₱1,250"
        #[arg(short, long)]
        price: String,
    },
    /// Remove a cart line by its index
    Remove { index: usize },
    /// Show the cart
    Cart,
    /// Check out and empty the cart
    Checkout,
    /// Buy a single product without the cart
    Buy {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price label, e.g. "₱1,250"
        #[arg(short, long)]
        price: String,
    },
    /// Send the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(short, long)]
        message: String,

        /// Hosted form endpoint
        #[arg(long, env = "TIDEPOOL_CONTACT_ENDPOINT")]
        endpoint: Option<Url>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

async fn run(cli: Cli) -> Result<String, CommandError> {
    let store = FileStore::new(cli.data);
    let notifier = ConsoleNotifier::new(cli.yes);
    let return_to = PageTarget::new(get_env_or_default(
        "TIDEPOOL_RETURN_PAGE",
        PageTarget::DEFAULT_LANDING,
    ));
    let shop = Shop::new(&store, &notifier).with_return_to(return_to);

    match cli.command {
        Commands::Register { username, password } => {
            commands::account::register(&shop, &username, &password)
        }
        Commands::Login { username, password } => {
            commands::account::login(&shop, &username, &password)
        }
        Commands::Logout => commands::account::logout(&shop),
        Commands::Whoami => Ok(commands::account::whoami(&shop)),
        Commands::Add { name, price } => commands::cart::add(&shop, &name, &price),
        Commands::Remove { index } => commands::cart::remove(&shop, index),
        Commands::Cart => Ok(commands::cart::show(&shop)),
        Commands::Checkout => commands::cart::checkout(&shop),
        Commands::Buy { name, price } => commands::cart::buy(&shop, &name, &price),
        Commands::Contact {
            name,
            email,
            message,
            endpoint,
        } => {
            let client = endpoint.map(ContactClient::new).transpose()?;
            let form = ContactForm {
                name,
                email,
                message,
            };
            commands::contact::send(client.as_ref(), &form, &notifier).await
        }
    }
}
