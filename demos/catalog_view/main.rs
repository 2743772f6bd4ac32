//! Walk through the table view against a running catalog API
//!
//! Starts an in-process server on an ephemeral port unless
//! `CATALOG_API_BASE_URL` points somewhere else, then searches, sorts, pages,
//! renders each layout and writes the CSV export to the current directory.

use anyhow::Result;
use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = CatalogConfig::load(None)?;
    if std::env::var("CATALOG_API_BASE_URL").is_err() {
        config.client.api_base_url = spawn_local_server().await?;
    }

    let view = CatalogView::from_config(&config, Layout::Table)?;

    match view.refresh().await {
        RefreshOutcome::Refreshed { count } => println!("📦 Loaded {} products", count),
        RefreshOutcome::Failed { message } => {
            println!("❌ {}", message);
            return Ok(());
        }
        RefreshOutcome::AlreadyInFlight => {
            println!("⏳ A fetch is already running");
            return Ok(());
        }
    }

    let stats = view.stats();
    println!(
        "💰 Inventory value: {}",
        format_currency(stats.inventory_value)
    );

    println!("\n🔍 Search \"goreng\", sorted by price:");
    view.set_search_term("goreng");
    view.toggle_sort(SortKey::Price);
    print_rows(&view.visible_rows());

    println!("\n📄 All products, by stock descending, page 2:");
    view.set_search_term("");
    view.toggle_sort(SortKey::Stock);
    view.toggle_sort(SortKey::Stock);
    view.next_page();
    print_rows(&view.visible_rows());

    for layout in [Layout::Grid, Layout::Mobile] {
        println!("\n🧩 {} layout:", layout);
        view.set_renderer(Renderer::new(layout, config.layouts.preset(layout)));
        print_rows(&view.visible_rows());
    }

    match view.product_detail(999).await {
        DetailState::NotFound { id } => println!("\n🔎 Product {} not found", id),
        other => println!("\n🔎 Product 999: {:?}", other),
    }

    let dir = std::env::current_dir()?;
    match view.export_csv_to(&dir) {
        Some(path) => println!("\n📥 CSV written to {}", path.display()),
        None => println!("\n⚠️  {}", view.notice().unwrap_or_default()),
    }

    Ok(())
}

async fn spawn_local_server() -> Result<String> {
    let app = ServerBuilder::new()
        .with_product_service(InMemoryProductService::with_sample_data())
        .build()?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "local server stopped");
        }
    });

    Ok(base_url)
}

fn print_rows(rows: &[DisplayRow]) {
    for row in rows {
        println!(
            "  {:>4}  {:<7} {:<16} {:>12}  {:<9} [{}]",
            row.id_label, row.category_label, row.name, row.price_label, row.stock_label, row.tier_label
        );
    }
}
