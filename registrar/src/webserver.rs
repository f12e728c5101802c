use actix::{Addr, Handler, Message};
use actix_web::dev::Server;
use actix_web::error::QueryPayloadError;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use failure::Error;
use log::info;
use std::net::TcpListener;

use roster::{Confirmation, RegistryError};

use crate::config::Config;
use crate::executor::{ListActivities, RegistryExecutor, Signup, Unregister};
use crate::proto::http::{EmailQuery, MessageBody};
use crate::proto::Error as ServiceError;

type HttpResult = Result<HttpResponse, ServiceError>;

pub struct AppState {
    pub registry: Addr<RegistryExecutor>,
}

impl AppState {
    pub fn new(registry: Addr<RegistryExecutor>) -> web::Data<Self> {
        web::Data::new(AppState { registry })
    }
}

async fn registry_response<M>(state: &AppState, message: M) -> HttpResult
where
    M: Message<Result = Result<Confirmation, RegistryError>> + Send + 'static,
    RegistryExecutor: Handler<M>,
{
    let confirmation = state.registry.send(message).await??;
    Ok(HttpResponse::Ok().json(MessageBody::from(confirmation)))
}

async fn list_activities(state: web::Data<AppState>) -> HttpResult {
    let activities = state.registry.send(ListActivities).await?;
    Ok(HttpResponse::Ok().json(activities))
}

async fn signup(
    path: web::Path<String>,
    query: web::Query<EmailQuery>,
    state: web::Data<AppState>,
) -> HttpResult {
    let message = Signup::new(path.into_inner(), query.into_inner().email);
    registry_response(&state, message).await
}

async fn unregister(
    path: web::Path<String>,
    query: web::Query<EmailQuery>,
    state: web::Data<AppState>,
) -> HttpResult {
    let message = Unregister::new(path.into_inner(), query.into_inner().email);
    registry_response(&state, message).await
}

fn query_error(err: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    ServiceError::InvalidQuery {
        error: format!("{}", err),
    }
    .into()
}

/// Registers the activity routes. Expects `web::Data<AppState>` in app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/activities", web::get().to(list_activities))
        .route("/activities/{activity}/signup", web::post().to(signup))
        .route("/activities/{activity}/unregister", web::post().to(unregister));
}

pub fn start(config: &Config, registry: Addr<RegistryExecutor>) -> Result<Server, Error> {
    let listener = TcpListener::bind(&config.network.addr)?;
    info!("listening on {}", config.network.addr);
    listen(listener, config.network.workers, registry)
}

/// Serves on an already bound listener.
pub fn listen(
    listener: TcpListener,
    workers: usize,
    registry: Addr<RegistryExecutor>,
) -> Result<Server, Error> {
    let state = AppState::new(registry);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}
