//! Server module.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use issues_config::Config;
use issues_core::{CoreContext, CoreModule};
use issues_database_interface::DbService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    health::health_check_route,
    issues::{create_default_project_issue, create_issue, delete_issue, list_issues, update_issue},
    metrics::build_metrics_handler,
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Issue store.
    pub db_service: Box<dyn DbService>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule, db_service: Box<dyn DbService>) -> Self {
        Self {
            config,
            core_module,
            db_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    metrics: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(metrics)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/api/issues")
                .wrap(Cors::permissive())
                .route("", web::post().to(create_default_project_issue))
                .route("/{project}", web::get().to(list_issues))
                .route("/{project}", web::post().to(create_issue))
                .route("/{project}", web::put().to(update_issue))
                .route("/{project}", web::delete().to(delete_issue)),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .json(serde_json::json!({"message": "Welcome on the issue tracker!" }))
            }),
        )
}

/// Run issue server until shutdown, then close the store.
pub async fn run_issue_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting issue server",
    );

    run_issue_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_issue_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let metrics = build_metrics_handler()?;
    let context = Data::new(context);
    let cloned_context = context.clone();

    // Build the (non-Send) HttpServer in its own scope so only the Send
    // `Server` future is held across the await point.
    let running = {
        let mut server =
            HttpServer::new(move || build_actix_app(context.clone(), metrics.clone()));

        if let Some(workers) = cloned_context.config.server.workers_count {
            server = server.workers(workers as usize);
        }

        server.bind(ip_with_port).map(|server| server.run())
    };

    let result = match running {
        Ok(server) => server.await,
        Err(e) => Err(e),
    }
    .map_err(|e| ServerError::IoError { source: e });

    info!("Closing issue store");
    cloned_context
        .db_service
        .close()
        .await
        .map_err(|e| ServerError::DatabaseError { source: e })?;

    result
}

#[cfg(test)]
mod tests {
    use issues_config::Config;

    use super::get_bind_address;

    #[test]
    fn bind_address() {
        let mut config = Config::from_env_no_version().unwrap();
        config.server.bind_ip = "0.0.0.0".into();
        config.server.bind_port = 8008;

        assert_eq!(get_bind_address(&config), "0.0.0.0:8008");
    }
}
