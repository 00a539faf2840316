use super::response::{text_error, CreatedResponse, TicketList, INTERNAL_ERROR};
use super::server::with_store;
use super::Server;
use crate::Error;
use database::DocumentCollection;
use model::NewTicket;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Response};
use warp::{Rejection, Reply};

pub async fn create_ticket<C: DocumentCollection>(
    server: Arc<Server<C>>,
    body: Bytes,
) -> Result<impl Reply, Rejection> {
    let ticket: NewTicket = serde_json::from_slice(&body).map_err(Error::BadRequest)?;

    let id = with_store(&server, move |server| async move {
        server.store.create_ticket(&ticket).await
    })
    .await?;

    Ok(reply::with_status(
        reply::json(&CreatedResponse { id }),
        StatusCode::CREATED,
    ))
}

pub async fn list_tickets<C: DocumentCollection>(
    server: Arc<Server<C>>,
    params: HashMap<String, String>,
) -> Result<impl Reply, Rejection> {
    let query = params.get("q").cloned().unwrap_or_default();

    let search = query.clone();
    let tickets = with_store(&server, move |server| async move {
        server.store.find_tickets(&search).await
    })
    .await?;

    // a search with no hits is a 404, but the body is still written
    let status = if tickets.is_empty() && !query.is_empty() {
        debug!(query = %query, "no tickets found");
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    Ok(reply::with_status(
        reply::json(&TicketList::new(tickets)),
        status,
    ))
}

pub async fn get_ticket<C: DocumentCollection>(
    id: String,
    server: Arc<Server<C>>,
) -> Result<impl Reply, Rejection> {
    let ticket = with_store(&server, move |server| async move {
        server.store.find_ticket(&id).await
    })
    .await?;

    Ok(reply::json(&ticket))
}

pub async fn update_ticket<C: DocumentCollection>(
    id: String,
    server: Arc<Server<C>>,
    body: Bytes,
) -> Result<impl Reply, Rejection> {
    let updates: Map<String, Value> = serde_json::from_slice(&body).map_err(Error::BadRequest)?;

    let ticket = with_store(&server, move |server| async move {
        server.store.update_ticket(&id, &updates).await
    })
    .await?;

    Ok(reply::json(&ticket))
}

pub async fn delete_ticket<C: DocumentCollection>(
    id: String,
    server: Arc<Server<C>>,
) -> Result<impl Reply, Rejection> {
    with_store(&server, move |server| async move {
        server.store.delete_ticket(&id).await
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Maps handler errors onto status codes. Only bad request detail reaches the
/// client; internal failures are logged and redacted.
pub async fn recover(rejection: Rejection) -> Result<Response, Rejection> {
    let err = match rejection.find::<Error>() {
        Some(err) => err,
        None => return Err(rejection),
    };

    if err.is_not_found() {
        debug!(error = %err, "ticket not found");
        return Ok(text_error(
            &database::Error::TicketNotFound.to_string(),
            StatusCode::NOT_FOUND,
        ));
    }

    match err {
        Error::BadRequest(_) => {
            debug!(error = %err, "bad request");
            Ok(text_error(&err.to_string(), StatusCode::BAD_REQUEST))
        }
        _ => {
            error!(error = %err, "request failed");
            Ok(text_error(INTERNAL_ERROR, StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}
