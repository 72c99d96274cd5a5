//! `nft-market` binary.

use clap::{Parser, Subcommand};
use near_primitives::types::AccountId;
use nft_market_cli::client::fetch_stats;
use nft_market_cli::{deploy, keys, Config, MarketplaceClient, TxReceipt};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "nft-market", version, about = "Mint, list, buy and cancel NFTs on the marketplace")]
struct Cli {
    /// Return once the transaction is broadcast instead of waiting for its outcome.
    #[arg(long, global = true)]
    no_wait: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mint a new NFT to <recipient> (contract owner only).
    Mint { recipient: AccountId },
    /// Approve the marketplace and list <token-id> for <price> yoctoNEAR.
    List {
        token_id: String,
        price: u128,
        /// Royalty in basis points, paid to the signer.
        #[arg(default_value_t = 0)]
        royalty_bps: u16,
    },
    /// Buy <token-id> listed by <seller>, attaching the listing price.
    Buy { token_id: String, seller: AccountId },
    /// Change the price of your listing of <token-id>.
    UpdatePrice { token_id: String, price: u128 },
    /// Cancel your listing of <token-id>.
    Cancel { token_id: String },
    /// Show marketplace statistics. Needs no signing key.
    Stats,
    /// Set the marketplace fee in basis points (marketplace owner only).
    SetFee { fee_bps: u16 },
    /// Deploy simple-nft and nft-marketplace to sub-accounts of the signer.
    Deploy,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), nft_market_cli::Error> {
    let config = Config::load()?;
    info!(network = %config.network, rpc = %config.rpc_url(), "Configuration loaded");
    let wait = !cli.no_wait;

    match cli.command {
        Command::Mint { recipient } => {
            let client = signed_client(config, wait)?;
            println!("Minting NFT to {recipient}...");
            print_receipt("Mint", &client.mint(&recipient).await?);
        }
        Command::List {
            token_id,
            price,
            royalty_bps,
        } => {
            let client = signed_client(config, wait)?;
            println!("Listing NFT #{token_id} for {price} yoctoNEAR...");
            print_receipt("List", &client.list(&token_id, price, royalty_bps).await?);
        }
        Command::Buy { token_id, seller } => {
            let client = signed_client(config, wait)?;
            println!("Buying NFT #{token_id} from {seller}...");
            print_receipt("Buy", &client.buy(&token_id, &seller).await?);
        }
        Command::UpdatePrice { token_id, price } => {
            let client = signed_client(config, wait)?;
            println!("Updating price of NFT #{token_id} to {price} yoctoNEAR...");
            print_receipt("Update price", &client.update_price(&token_id, price).await?);
        }
        Command::Cancel { token_id } => {
            let client = signed_client(config, wait)?;
            println!("Canceling listing for NFT #{token_id}...");
            print_receipt("Cancel", &client.cancel(&token_id).await?);
        }
        Command::Stats => {
            let (marketplace, stats) = fetch_stats(&config).await?;
            println!("Marketplace Statistics:");
            println!("- Total Volume: {} yoctoNEAR", stats.total_volume);
            println!("- Total Sales: {}", stats.total_sales);
            println!("- Marketplace Fee: {} bps", stats.marketplace_fee_bps);
            println!("- Active Listings: {}", stats.active_listings);
            println!("Explorer: {}", config.account_url(&marketplace));
        }
        Command::SetFee { fee_bps } => {
            let client = signed_client(config, wait)?;
            print_receipt("Set fee", &client.set_fee(fee_bps).await?);
        }
        Command::Deploy => {
            let client = signed_client(config, wait)?;
            println!("Deploying NFT Marketplace contracts...");
            let report = deploy::deploy_contracts(&client).await?;
            println!("Simple NFT contract deployed to {}", report.nft_contract);
            print_receipt("Deploy simple-nft", &report.nft_tx);
            println!(
                "Marketplace contract deployed to {}",
                report.marketplace_contract
            );
            print_receipt("Deploy nft-marketplace", &report.marketplace_tx);
            println!("All contracts deployed successfully!");
        }
    }
    Ok(())
}

/// Loads the signing key; every command except `stats` needs one.
fn signed_client(config: Config, wait: bool) -> Result<MarketplaceClient, nft_market_cli::Error> {
    let signer = keys::load_signer(&config)?;
    MarketplaceClient::new(config, signer, wait)
}

fn print_receipt(label: &str, receipt: &TxReceipt) {
    println!("{label} transaction sent!");
    println!("Transaction ID: {}", receipt.tx_hash);
    println!("Explorer: {}", receipt.explorer_url);
    if let Some(value) = &receipt.return_value {
        println!("Result: {value}");
    }
}
