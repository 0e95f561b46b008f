use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use adventure_planner::cache::{CacheConfig, TtlCache};
use adventure_planner::mapbox::{MapboxClient, MapboxConfig, MockMapboxClient};
use adventure_planner::places::{PlaceSearch, PlaceSearchConfig, PlaceSearchProvider};
use adventure_planner::planner::{Planner, PlannerConfig};
use adventure_planner::routing::{Routing, RoutingConfig, TravelTimeProvider};
use adventure_planner::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("adventure_planner=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let settings = Settings::from_env();

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(%addr, error = %e, "invalid BIND_ADDR");
            return;
        }
    };

    if let Ok(dir) = std::env::var("MOCK_DATA_DIR") {
        let mock = match MockMapboxClient::new(&dir) {
            Ok(mock) => mock,
            Err(e) => {
                error!(%dir, error = %e, "failed to load mock places");
                return;
            }
        };
        info!(%dir, categories = mock.available_categories().len(), "serving mock places");
        serve(addr, mock.clone(), mock, settings).await;
        return;
    }

    let Ok(token) = std::env::var("MAPBOX_ACCESS_TOKEN") else {
        error!("MAPBOX_ACCESS_TOKEN not set; set it, or MOCK_DATA_DIR to serve fixture places");
        return;
    };
    let client = match MapboxClient::new(MapboxConfig::new(token)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create Mapbox client");
            return;
        }
    };
    serve(addr, client.clone(), client, settings).await;
}

/// Tunables read from the environment, defaulted when unset.
struct Settings {
    cache: CacheConfig,
    routing: RoutingConfig,
    search: PlaceSearchConfig,
    request_timeout: Option<Duration>,
}

impl Settings {
    fn from_env() -> Self {
        let mut cache = CacheConfig::default();
        if let Some(secs) = env_parse::<u64>("CACHE_TTL_SECS") {
            cache = cache.with_ttl(Duration::from_secs(secs));
        }
        if let Some(entries) = env_parse::<u64>("CACHE_MAX_ENTRIES") {
            cache = cache.with_max_capacity(entries);
        }

        let mut routing = RoutingConfig::default();
        let mut search = PlaceSearchConfig::default();
        if let Some(secs) = env_parse::<u64>("LOOKUP_TIMEOUT_SECS") {
            routing = routing.with_timeout(Duration::from_secs(secs));
            search = search.with_timeout(Duration::from_secs(secs));
        }
        if let Some(precision) = env_parse::<u32>("CACHE_KEY_PRECISION") {
            routing = routing.with_coordinate_precision(precision);
            search = search.with_coordinate_precision(precision);
        }

        Self {
            cache,
            routing,
            search,
            request_timeout: env_parse::<u64>("REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
        }
    }
}

/// Build the planner over `routing` and `search` and serve it on `addr`.
async fn serve<R, S>(addr: SocketAddr, routing: R, search: S, settings: Settings)
where
    R: Routing + Send + Sync + 'static,
    S: PlaceSearch + Send + Sync + 'static,
{
    let planner = Planner::new(
        TravelTimeProvider::new(routing, TtlCache::new(&settings.cache), settings.routing),
        PlaceSearchProvider::new(search, TtlCache::new(&settings.cache), settings.search),
        PlannerConfig::default(),
    );
    let mut state = AppState::new(planner);
    if let Some(timeout) = settings.request_timeout {
        state = state.with_request_timeout(timeout);
    }
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return;
        }
    };

    info!(%addr, "adventure planner listening");
    info!("  GET  /health");
    info!("  GET  /api/status");
    info!("  POST /api/itinerary/plan");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
    }
}

/// Read and parse an environment variable, ignoring it if malformed.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}
