use anyhow::Context;
use emporium_api::{app, AppState};
use emporium_catalog::{AdTable, CurrencyTable, FileCatalog};
use emporium_core::{CardPaymentProcessor, FlatRateShipping, LogNotifier};
use emporium_order::CheckoutServices;
use emporium_store::{Config, MemoryCartStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "emporium_api=debug,emporium_order=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Emporium API on port {}", config.server.port);

    let catalog = Arc::new(
        FileCatalog::load(&config.catalog.products_path)
            .await
            .context("Failed to load product catalog")?,
    );
    let rates = CurrencyTable::load(&config.currency.rates_path)
        .await
        .context("Failed to load currency rates")?;
    let shipping = FlatRateShipping::new(config.shipping.flat_rate.clone())
        .context("Invalid shipping flat rate")?;
    let ads = AdTable::load(&config.ads.ads_path)
        .await
        .context("Failed to load ads")?;

    let services = CheckoutServices {
        cart: Arc::new(MemoryCartStore::new()),
        catalog: catalog.clone(),
        currency: Arc::new(rates),
        shipping: Arc::new(shipping),
        payment: Arc::new(CardPaymentProcessor::new(
            config.payment.accepted_cards.clone(),
        )),
        notifier: Arc::new(LogNotifier),
    };
    let app_state = AppState::new(services, tracing::info_span!("checkout"))
        .with_ads(Arc::new(ads))
        .with_catalog_reload(catalog.clone());

    #[cfg(unix)]
    spawn_reload_on_signal(catalog)?;

    let app = app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// `kill -USR1 <pid>` re-reads the product file.
#[cfg(unix)]
fn spawn_reload_on_signal(catalog: Arc<FileCatalog>) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut reloads =
        signal(SignalKind::user_defined1()).context("Failed to install SIGUSR1 handler")?;
    tokio::spawn(async move {
        while reloads.recv().await.is_some() {
            match catalog.reload().await {
                Ok(count) => tracing::info!(count, "Catalog reloaded on SIGUSR1"),
                Err(e) => tracing::error!(error = %e, "Catalog reload on SIGUSR1 failed"),
            }
        }
    });
    Ok(())
}
