use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;

use crate::{actions, complexes, goals, outcomes};
use engine::Engine;

static USER_ID_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-user-id");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// The authenticated caller, inserted by the identity middleware.
#[derive(Clone, Debug)]
pub struct CallerId(pub String);

/// `TypedHeader` for the identity header.
///
/// Every request under `/api/v1` (except ping) must carry an `x-user-id`
/// entry naming the caller; an upstream gateway is trusted to have
/// verified it.
#[derive(Debug)]
struct UserIdHeader(String);

impl Header for UserIdHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value.trim().is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserIdHeader(value.trim().to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-id header"),
        }
    }
}

async fn identity(
    user_header: Option<TypedHeader<UserIdHeader>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(UserIdHeader(user_id))) = user_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(CallerId(user_id));
    Ok(next.run(request).await)
}

async fn ping() -> &'static str {
    "pong"
}

pub(crate) fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/complexes", post(complexes::create).get(complexes::list))
        .route(
            "/complexes/{id}",
            get(complexes::detail)
                .patch(complexes::update)
                .delete(complexes::remove),
        )
        .route("/goals", post(goals::create).get(goals::list))
        .route(
            "/goals/{id}",
            get(goals::detail).patch(goals::update).delete(goals::remove),
        )
        .route("/actions", post(actions::create).get(actions::list))
        .route(
            "/actions/{id}",
            get(actions::detail)
                .patch(actions::update)
                .delete(actions::remove),
        )
        .route("/actions/{id}/gains", post(outcomes::add_gain))
        .route("/actions/{id}/losses", post(outcomes::add_loss))
        .route("/gains/{id}", delete(outcomes::remove_gain))
        .route("/losses/{id}", delete(outcomes::remove_loss))
        .route_layer(middleware::from_fn(identity))
        .route("/ping", get(ping));

    Router::new().nest("/api/v1", api).with_state(state)
}

/// Build the full application router around an engine.
///
/// Useful for embedding and for driving the API in-process in tests.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
