use super::handlers;
use crate::{Config, Error, Result};
use database::{DocumentCollection, TicketStore};
use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;
use warp::{Filter, Rejection, Reply};

/// Deadline for a single store operation, independent of the client.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(8);

pub struct Server<C: DocumentCollection> {
    pub config: Config,
    pub store: TicketStore<C>,
}

impl<C: DocumentCollection> Server<C> {
    pub fn new(config: Config, store: TicketStore<C>) -> Server<C> {
        Server { config, store }
    }

    pub async fn start<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address: SocketAddr = self.config.server_addr.parse()?;

        let routes = Arc::new(self).routes();
        let (address, server) =
            warp::serve(routes).try_bind_with_graceful_shutdown(address, shutdown)?;

        info!(%address, "server started");
        server.await;
        info!("server stopped");

        Ok(())
    }

    pub fn routes(self: Arc<Self>) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let server = warp::any().map(move || Arc::clone(&self));

        let tickets = warp::path!("api" / "v1" / "tickets");
        let ticket = warp::path!("api" / "v1" / "tickets" / String);

        let create = warp::post()
            .and(tickets)
            .and(server.clone())
            .and(warp::body::bytes())
            .and_then(handlers::create_ticket::<C>);

        let list = warp::get()
            .and(tickets)
            .and(server.clone())
            .and(warp::query::<HashMap<String, String>>())
            .and_then(handlers::list_tickets::<C>);

        let get = warp::get()
            .and(ticket)
            .and(server.clone())
            .and_then(handlers::get_ticket::<C>);

        let update = warp::put()
            .and(ticket)
            .and(server.clone())
            .and(warp::body::bytes())
            .and_then(handlers::update_ticket::<C>);

        let delete = warp::delete()
            .and(ticket)
            .and(server)
            .and_then(handlers::delete_ticket::<C>);

        let cors = warp::cors()
            .allow_any_origin()
            .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allow_headers(vec!["Content-Type", "Authorization"]);

        create
            .or(list)
            .or(get)
            .or(update)
            .or(delete)
            .recover(handlers::recover)
            .with(cors)
            .with(warp::log::custom(|info| {
                info!(
                    method = %info.method(),
                    path = info.path(),
                    status = info.status().as_u16(),
                    elapsed = ?info.elapsed(),
                    "received request"
                );
            }))
    }
}

/// Runs `op` on its own task under [`STORE_TIMEOUT`]. The task is detached
/// from the request, so a client disconnect does not cancel it.
pub(super) async fn with_store<C, T, F, Fut>(server: &Arc<Server<C>>, op: F) -> Result<T>
where
    C: DocumentCollection,
    F: FnOnce(Arc<Server<C>>) -> Fut,
    Fut: Future<Output = database::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::spawn(timeout(STORE_TIMEOUT, op(Arc::clone(server))));

    match task.await? {
        Ok(res) => Ok(res?),
        Err(elapsed) => Error::Timeout(elapsed).into(),
    }
}
