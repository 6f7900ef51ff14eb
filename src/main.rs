//! DineDesk CLI
//!
//! Terminal client for restaurant operations:
//! - List and inspect orders
//! - Move orders through the kitchen workflow
//! - Watch for new orders with an audible bell
//! - Browse bookings, transcripts and the menu

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration as StdDuration;

use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};

use dinedesk::client::{ApiClient, ReqwestTransport, Session};
use dinedesk::config::{generate_default_config, Config};
use dinedesk::format::{format_cents, format_duration, format_phone, format_relative};
use dinedesk::logging::init_logging;
use dinedesk::models::{
    BookingStatus, Order, OrderFilter, OrderStatus, PaymentStatus, TranscriptKind,
};
use dinedesk::notify::{AlertDecision, OrderAlert, TerminalBell};

#[derive(Parser)]
#[command(name = "dinedesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Restaurant operations from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "DINEDESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Restaurant account id (overrides config)
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Config file (default: searched in standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List orders
    Orders {
        /// Filter by status (pending, preparing, ready, completed, cancelled)
        #[arg(short, long)]
        status: Option<String>,
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// End date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
        /// Customer name, phone or order number
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one order with its items
    Order {
        /// Order id
        id: String,
    },

    /// Change an order's status
    SetStatus {
        id: String,
        status: String,
    },

    /// Change an order's payment status
    SetPayment {
        id: String,
        status: String,
    },

    /// Poll for new orders and ring the bell when one arrives
    Watch {
        /// Seconds between polls (default: polling.order_alerts_secs)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Print new orders without ringing
        #[arg(long)]
        no_sound: bool,
    },

    /// List reservations
    Bookings {
        /// Date, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// List SMS and call transcripts
    Transcripts {
        /// sms or voice
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Show the menu
    Menu,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(account) = &cli.account {
        config.api.account_id = Some(account.clone());
    }
    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
    }

    init_logging(&config.logging);
    tracing::debug!("DineDesk CLI v{}", env!("CARGO_PKG_VERSION"));

    let session = Rc::new(Session::in_memory());
    if let Some(token) = &config.api.token {
        session.set_token(token.clone());
    }
    let transport = ReqwestTransport::new(config.api.request_timeout_secs)?;
    let api = ApiClient::new(config.api.base_url.clone(), transport, session)
        .on_unauthorized(|| eprintln!("Token rejected; set DINEDESK_TOKEN or pass --token"));

    let account = || {
        config
            .api
            .account_id
            .clone()
            .ok_or_else(|| anyhow!("no account id: pass --account or set DINEDESK_ACCOUNT_ID"))
    };

    match cli.command {
        Commands::Orders {
            status,
            from,
            to,
            search,
        } => {
            let mut filter = OrderFilter::default().with_dates(from, to);
            if let Some(status) = status {
                filter = filter.with_status(parse_order_status(&status)?);
            }
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            let orders = api.list_orders(&account()?, &filter).await?;
            print_orders(&orders, &cli.format)?;
        }

        Commands::Order { id } => {
            let order = api.get_order(&id).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&order)?);
            } else {
                print_order_detail(&order);
            }
        }

        Commands::SetStatus { id, status } => {
            let status = parse_order_status(&status)?;
            let order = api.update_order_status(&id, status).await?;
            println!("{} is now {}", order.display_number(), order.status.label());
        }

        Commands::SetPayment { id, status } => {
            let status = PaymentStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown payment status: {}", status))?;
            let order = api.update_payment_status(&id, status).await?;
            println!(
                "{} payment is now {}",
                order.display_number(),
                order.payment_status.label()
            );
        }

        Commands::Watch { interval, no_sound } => {
            let account = account()?;
            let secs = interval.unwrap_or(config.polling.order_alerts_secs).max(1);
            let mut alert = OrderAlert::new(TerminalBell::stdout());
            alert.set_enabled(config.notifications.sound_enabled && !no_sound);

            println!("Watching orders every {}s (Ctrl-C to stop)", secs);
            let mut ticker = tokio::time::interval(StdDuration::from_secs(secs));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = tokio::signal::ctrl_c() => break,
                }

                let orders = match api.list_orders(&account, &OrderFilter::default()).await {
                    Ok(orders) => orders,
                    Err(e) => {
                        tracing::warn!("poll failed: {}", e);
                        continue;
                    }
                };

                match alert.check(&orders) {
                    AlertDecision::Suppressed => {
                        println!("{} orders loaded", orders.len());
                    }
                    AlertDecision::Chime { new_order_ids } => {
                        for order in orders.iter().filter(|o| new_order_ids.contains(&o.id)) {
                            println!(
                                "NEW {} {} {} {}",
                                order.display_number(),
                                order.customer_label(),
                                order.items.summary(),
                                format_cents(order.total)
                            );
                        }
                    }
                    AlertDecision::Quiet => {}
                }
            }
            alert.close();
        }

        Commands::Bookings { date, status } => {
            let status = status
                .map(|s| BookingStatus::parse(&s).ok_or_else(|| anyhow!("unknown booking status: {}", s)))
                .transpose()?;
            let bookings = api
                .list_bookings(&account()?, date.as_deref(), status)
                .await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&bookings)?);
            } else {
                println!("{:<6} {:<11} {:<6} {:<24} {:<10}", "Time", "Date", "Party", "Name", "Status");
                println!("{}", "-".repeat(60));
                for b in &bookings {
                    println!(
                        "{:<6} {:<11} {:<6} {:<24} {:<10}",
                        b.time,
                        b.date,
                        b.party_size,
                        b.customer_name.as_deref().unwrap_or("Guest"),
                        b.status.label()
                    );
                }
            }
        }

        Commands::Transcripts { kind } => {
            let kind = kind
                .map(|k| TranscriptKind::parse(&k).ok_or_else(|| anyhow!("unknown transcript kind: {}", k)))
                .transpose()?;
            let transcripts = api.list_transcripts(&account()?, kind).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&transcripts)?);
            } else {
                let now = Utc::now();
                for t in &transcripts {
                    let duration = t
                        .duration_seconds
                        .map(format_duration)
                        .unwrap_or_default();
                    println!(
                        "{:<6} {:<16} {:<12} {:>8}  {}",
                        t.kind.label(),
                        t.customer_phone.as_deref().map(format_phone).unwrap_or_default(),
                        t.created_at
                            .map(|at| format_relative(at, now))
                            .unwrap_or_default(),
                        duration,
                        t.preview()
                    );
                }
            }
        }

        Commands::Menu => {
            let menu = api.get_menu(&account()?).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&menu)?);
            } else {
                for category in &menu.categories {
                    println!("{}", category.name);
                    for item in &category.items {
                        let flag = if item.is_available { "" } else { "  (86'd)" };
                        println!("  {:<32} {:>9}{}", item.name, format_cents(item.price), flag);
                    }
                }
                println!(
                    "\n{} items, {} unavailable",
                    menu.item_count(),
                    menu.unavailable_count()
                );
            }
        }

        // Written before any config was loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn parse_order_status(s: &str) -> anyhow::Result<OrderStatus> {
    OrderStatus::parse(s).ok_or_else(|| anyhow!("unknown order status: {}", s))
}

fn print_orders(orders: &[Order], format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(orders)?),
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["id", "number", "status", "payment", "customer", "items", "total", "created_at"])?;
            for o in orders {
                writer.write_record(&[
                    o.id.clone(),
                    o.display_number(),
                    o.status.as_str().to_string(),
                    o.payment_status.as_str().to_string(),
                    o.customer_label().to_string(),
                    o.items.summary(),
                    format_cents(o.total),
                    o.created_at.to_rfc3339(),
                ])?;
            }
            writer.flush()?;
        }
        "table" => {
            let now = Utc::now();
            println!(
                "{:<10} {:<10} {:<9} {:<20} {:>10}  {:<10} {}",
                "Order", "Status", "Payment", "Customer", "Total", "Placed", "Items"
            );
            println!("{}", "-".repeat(96));
            for o in orders {
                println!(
                    "{:<10} {:<10} {:<9} {:<20} {:>10}  {:<10} {}",
                    o.display_number(),
                    o.status.label(),
                    o.payment_status.label(),
                    o.customer_label(),
                    format_cents(o.total),
                    format_relative(o.created_at, now),
                    o.items.summary()
                );
            }
            println!("\n{} orders", orders.len());
        }
        other => bail!("unknown format: {} (expected table, json or csv)", other),
    }
    Ok(())
}

fn print_order_detail(order: &Order) {
    println!("Order {}", order.display_number());
    println!("  Status:   {}", order.status.label());
    println!("  Payment:  {}", order.payment_status.label());
    println!("  Customer: {}", order.customer_label());
    if let Some(phone) = &order.customer_phone {
        println!("  Phone:    {}", format_phone(phone));
    }
    if let Some(address) = &order.delivery_address {
        println!("  Address:  {}", address);
    }
    println!();
    if order.items.is_empty() {
        println!("  No items");
    }
    for item in order.items.as_slice() {
        println!(
            "  {:>2} × {:<28} {:>9}",
            item.quantity,
            item.name,
            format_cents(item.line_total())
        );
        for m in &item.modifiers {
            println!("       + {}", m.name);
        }
        if let Some(notes) = &item.notes {
            println!("       \"{}\"", notes);
        }
    }
    println!();
    println!("  Subtotal {:>12}", format_cents(order.subtotal));
    println!("  Tax      {:>12}", format_cents(order.tax));
    if order.delivery_fee > 0 {
        println!("  Delivery {:>12}", format_cents(order.delivery_fee));
    }
    println!("  Total    {:>12}", format_cents(order.total));
    if let Some(notes) = &order.special_instructions {
        println!("\n  Note: {}", notes);
    }
}
