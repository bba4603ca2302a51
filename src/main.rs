//! UEEX Calculator API Server
//!
//! REST backend for the UEEX electricity-market calculator: exchange fee
//! breakdowns, ENTSO-E/MMS schedule XML documents and the price-history
//! chart feed.

mod models;
mod prices;
mod web;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::prices::{PriceService, PriceSourceConfig, DEFAULT_QUOTATIONS_URL};

/// UEEX Calculator API Server: fees, schedules and prices.
#[derive(Parser, Debug)]
#[command(name = "ueex-calc", version)]
struct Args {
    /// Address to bind the web server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(long = "web-port", default_value_t = 5000)]
    web_port: u16,

    /// UEEX quotation page used for price history
    #[arg(long = "ueex-url", default_value = DEFAULT_QUOTATIONS_URL)]
    ueex_url: String,

    /// Timeout for the quotation fetch, in seconds
    #[arg(long = "fetch-timeout-secs", default_value_t = 10)]
    fetch_timeout_secs: u64,

    /// Never contact UEEX; serve synthetic price history
    #[arg(long)]
    offline: bool,
}

fn print_banner() {
    println!("========================================");
    println!("   UEEX Calculator API Server");
    println!("   Fees / Schedules / Prices");
    println!("   Version {}", env!("CARGO_PKG_VERSION"));
    println!("========================================");
    println!();
}

fn print_endpoints(port: u16) {
    println!();
    println!("========================================");
    println!("   UEEX Calculator is READY!");
    println!("========================================");
    println!();
    println!("API Endpoints:");
    println!("  Health Check:     GET  http://localhost:{port}/health");
    println!();
    println!("  Calculator:");
    println!("    Fees:           POST http://localhost:{port}/api/fees");
    println!("    Reference:      GET  http://localhost:{port}/api/reference");
    println!();
    println!("  Schedules:");
    println!("    Generate:       POST http://localhost:{port}/api/schedule");
    println!("    Download:       POST http://localhost:{port}/api/schedule/download");
    println!("    New Doc ID:     GET  http://localhost:{port}/api/schedule/new-id");
    println!();
    println!("  Prices:");
    println!("    History:        GET  http://localhost:{port}/api/prices?period=month");
    println!();
    println!("Press Ctrl+C to stop the server...");
    println!();
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    print_banner();

    let config = PriceSourceConfig {
        url: args.ueex_url.clone(),
        timeout: Duration::from_secs(args.fetch_timeout_secs),
        offline: args.offline,
    };

    let price_service = match PriceService::new(config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to initialise the price service!");
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    };

    if args.offline {
        println!("Offline mode: price history uses synthetic data.");
    } else {
        println!("Price history source: {}", args.ueex_url);
    }

    // Set up graceful shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let shutdown_tx = Arc::new(std::sync::Mutex::new(Some(shutdown_tx)));

    let handler = ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, shutting down gracefully...");
        if let Some(tx) = shutdown_tx.lock().ok().and_then(|mut guard| guard.take()) {
            let _ = tx.send(());
        }
    });
    if let Err(e) = handler {
        eprintln!("Failed to set Ctrl+C handler: {e}");
        std::process::exit(1);
    }

    // Build router
    let app = web::create_router(Arc::new(price_service));

    print_endpoints(args.web_port);

    // Start server
    let addr = format!("{}:{}", args.host, args.web_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind to {addr}: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
    {
        tracing::error!("Server error: {e}");
    }

    println!("Shutdown complete. Goodbye!");
}
