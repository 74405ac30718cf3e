use sea_orm::DatabaseConnection;
use std::time::Duration as StdDuration;

use crate::auth::cleanup;

/// Spawns the spec §4.H cleanup sweep on its own interval timer, independent
/// of any request task. Runs once per `interval` and logs what it did; a
/// failed sweep is logged and retried on the next tick rather than killing
/// the task.
pub fn spawn_login_history_sweep(
    db: DatabaseConnection,
    interval: StdDuration,
    retention_hours: i64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match cleanup::prune_expired_sessions(&db, retention_hours).await {
                Ok(removed) if removed > 0 => {
                    log::info!("login-history sweep removed {removed} expired session(s)");
                }
                Ok(_) => {}
                Err(e) => log::error!("login-history sweep failed: {e}"),
            }
        }
    })
}
