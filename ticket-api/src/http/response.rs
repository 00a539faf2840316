use model::{Ticket, TicketId};
use serde::Serialize;
use warp::http::header::{HeaderValue, X_CONTENT_TYPE_OPTIONS};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

pub const INTERNAL_ERROR: &str = "an internal server error occurred";

#[derive(Serialize, Debug)]
pub struct CreatedResponse {
    pub id: TicketId,
}

#[derive(Serialize, Debug)]
pub struct TicketList {
    pub count: usize,
    pub tickets: Vec<Ticket>,
}

impl TicketList {
    pub fn new(tickets: Vec<Ticket>) -> TicketList {
        TicketList {
            count: tickets.len(),
            tickets,
        }
    }
}

/// Plain text error body, newline terminated.
pub fn text_error(message: &str, status: StatusCode) -> Response {
    let mut res = warp::reply::with_status(format!("{}\n", message), status).into_response();
    res.headers_mut()
        .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res
}
