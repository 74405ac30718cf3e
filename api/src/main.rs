mod auth;
mod error;
mod response;
mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let cfg = util::config::AppConfig::from_env();
    util::logger::init_logger(&cfg.log_level, &cfg.log_file);

    log::info!(
        "starting {} on {}:{}",
        cfg.project_name,
        cfg.host,
        cfg.port
    );

    let db = db::connect_and_migrate(&cfg.database_url)
        .await
        .expect("failed to connect to database");

    services::scheduler::spawn_login_history_sweep(
        db.clone(),
        Duration::from_secs(24 * 3600),
        cfg.login_history_retention_hours,
    );

    let app = routes::routes(db);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .expect("invalid HOST/PORT");
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    log::info!("listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}
