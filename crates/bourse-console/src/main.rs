#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use serde::Deserialize;

    pub const BACKEND_URL_ENV: &str = "BOURSE_BACKEND_URL";

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub backend: BackendConfig,
        pub session: SessionConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct BackendConfig {
        pub base_url: String,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct SessionConfig {
        pub cookie_name: String,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    impl Default for BackendConfig {
        fn default() -> Self {
            Self {
                base_url: "http://localhost:8080".into(),
            }
        }
    }

    impl Default for SessionConfig {
        fn default() -> Self {
            Self {
                cookie_name: "jwt".into(),
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads the file, falling back to defaults with a warning, then applies
    /// the backend URL override.
    pub fn load(path: &str, backendOverride: Option<String>) -> Config {
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => match parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        };
        if let Some(url) = backendOverride.filter(|u| !u.trim().is_empty()) {
            tracing::info!("backend url overridden by {BACKEND_URL_ENV}");
            config.backend.base_url = url;
        }
        config
    }

}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use bourse_api::GuardState;
    use bourse_client::BackendClient;
    use bourse_types::SessionCookieName;
    use bourse_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath, std::env::var(config::BACKEND_URL_ENV).ok());
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} backend={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.backend.base_url
    );

    let backend = BackendClient::new(&appConfig.backend.base_url)
        .unwrap_or_else(|e| panic!("invalid backend url: {e}"));
    let cookieName = SessionCookieName(appConfig.session.cookie_name.clone());

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let mut leptosOptions = conf.leptos_options;
    let addr: std::net::SocketAddr =
        format!("{}:{}", appConfig.server.bind, appConfig.server.port)
            .parse()
            .unwrap_or(leptosOptions.site_addr);
    leptosOptions.site_addr = addr;

    let routes = generate_route_list(App);

    let guardLayer = axum::middleware::from_fn_with_state(
        GuardState {
            cookie_name: appConfig.session.cookie_name.clone(),
        },
        bourse_api::route_guard,
    );

    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            move || {
                provide_context(backend.clone());
                provide_context(cookieName.clone());
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .layer(guardLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
