use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use futures::FutureExt;
use std::{any::Any, net::SocketAddr, panic::AssertUnwindSafe, sync::Arc};
use tracing::{error, info};
use weather_core::{Outcome, WeatherError, WeatherHandler, WeatherParams};

use crate::render;

/// Decoded query string pairs, in request order.
type Pairs = Vec<(String, String)>;

pub fn router(handler: Arc<WeatherHandler>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/weather", get(weather))
        .route("/health", get(health))
        .with_state(handler)
}

pub async fn serve(addr: SocketAddr, handler: Arc<WeatherHandler>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!("Weather service listening on http://{local}");

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Weather service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

async fn index() -> Html<String> {
    Html(render::index(None))
}

/// Always answers 200 with HTML; the outcome is in the page itself.
/// A repeated key keeps its first value.
async fn weather(
    State(handler): State<Arc<WeatherHandler>>,
    query: Option<Query<Pairs>>,
) -> Html<String> {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let params = WeatherParams::from_pairs(pairs);

    let future = AssertUnwindSafe(handler.handle(&params));
    let outcome = match future.catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => {
            let zip = params.zip_code.trim();
            let err = WeatherError::Unexpected(panic_message(panic.as_ref()));
            error!("Unexpected error for zip {zip}: {err}");
            Outcome::form_with_error(err.user_message())
        }
    };

    Html(render::outcome(&outcome))
}

async fn health() -> &'static str {
    "ok"
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use weather_core::{
        Config, FileConfig, RawResponse, WeatherFetcher, WeatherQuery,
        error::{INVALID_ZIP_MESSAGE, UNEXPECTED_MESSAGE},
    };

    const WASHINGTON: &str = r#"{"name":"Washington","sys":{"country":"US"},
        "main":{"temp":20.0,"temp_min":18.0,"temp_max":22.0},
        "weather":[{"description":"clear sky"}]}"#;

    #[derive(Debug)]
    struct Fixed(Option<RawResponse>);

    #[async_trait]
    impl WeatherFetcher for Fixed {
        async fn fetch(&self, _query: &WeatherQuery) -> Option<RawResponse> {
            self.0.clone()
        }
    }

    #[derive(Debug)]
    struct Exploding;

    #[async_trait]
    impl WeatherFetcher for Exploding {
        async fn fetch(&self, _query: &WeatherQuery) -> Option<RawResponse> {
            panic!("provider blew up");
        }
    }

    fn handler(fetcher: Arc<dyn WeatherFetcher>) -> Arc<WeatherHandler> {
        let file = FileConfig::default();
        let cfg = Config::from_parts(file, Some("KEY".into())).unwrap();
        Arc::new(WeatherHandler::new(&cfg, fetcher))
    }

    fn fixed(status: u16, body: &str) -> Arc<WeatherHandler> {
        let response = RawResponse::new(status, body);
        handler(Arc::new(Fixed(Some(response))))
    }

    fn params(pairs: &[(&str, &str)]) -> Option<Query<Pairs>> {
        let pairs = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Some(Query(pairs))
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();

        let body = response.into_body();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn renders_weather_page_on_success() {
        let h = fixed(200, WASHINGTON);

        let query = params(&[("zip_code", "20001"), ("units", "metric")]);
        let Html(html) = weather(State(h), query).await;

        assert!(html.contains("Weather in Washington, US"));
        assert!(html.contains("20°C"));
    }

    #[tokio::test]
    async fn missing_query_renders_validation_error() {
        let h = handler(Arc::new(Fixed(None)));

        let Html(html) = weather(State(h), None).await;

        assert!(html.contains(INVALID_ZIP_MESSAGE));
    }

    #[tokio::test]
    async fn panic_in_flow_is_caught_and_rendered_generically() {
        let h = handler(Arc::new(Exploding));

        let query = params(&[("zip_code", "20001")]);
        let Html(html) = weather(State(h), query).await;

        assert!(html.contains(UNEXPECTED_MESSAGE));
        assert!(!html.contains("provider blew up"));
    }

    #[tokio::test]
    async fn index_and_health() {
        let Html(html) = index().await;
        assert!(html.contains("<form"));
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn every_route_answers_200_with_html() {
        let app = router(fixed(404, "{}"));

        let (status, html) = send_get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<form"));

        let (status, html) = send_get(app.clone(), "/weather?zip_code=00000").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("not available for 00000"));

        let (status, html) = send_get(app.clone(), "/weather?zip_code=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(INVALID_ZIP_MESSAGE));

        let (status, html) = send_get(app.clone(), "/weather").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(INVALID_ZIP_MESSAGE));

        let (status, body) = send_get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn repeated_zip_code_keeps_first_value() {
        let app = router(fixed(200, WASHINGTON));

        let uri = "/weather?zip_code=20001&zip_code=abc&units=metric";
        let (status, html) = send_get(app, uri).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Weather in Washington, US"));
        assert!(html.contains("20°C"));
    }
}
