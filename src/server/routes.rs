//! Request routing for the rack API

use super::http::{Request, Response};
use crate::error::{RackError, RackResult};
use crate::plate::Allocation;
use crate::service::{RackRequest, RackService};

pub const API_PREFIX: &str = "/v1/api";

/// Dispatch one request
pub async fn route(service: &RackService, request: &Request) -> Response {
    if request.method == "OPTIONS" {
        return Response::no_content();
    }

    let rack_path = format!("{}/rack", API_PREFIX);
    let health_path = format!("{}/health", API_PREFIX);

    match request.path.as_str() {
        "/" | "/health" | "/status" => match request.method.as_str() {
            "GET" => health(),
            _ => Response::method_not_allowed(),
        },
        path if path == health_path => match request.method.as_str() {
            "GET" => health(),
            _ => Response::method_not_allowed(),
        },
        path if path == rack_path => match request.method.as_str() {
            "GET" => rack_get(service, request).await,
            "POST" => rack_post(service, request).await,
            _ => Response::method_not_allowed(),
        },
        _ => Response::not_found(),
    }
}

fn health() -> Response {
    Response::json(
        200,
        &serde_json::json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

async fn rack_get(service: &RackService, request: &Request) -> Response {
    let weight = match request.query_param("weight") {
        None | Some("") => return Response::bad_request("query parameter 'weight' is required"),
        Some(raw) => match raw.parse::<i64>() {
            Ok(weight) => weight,
            Err(_) => {
                return Response::bad_request("invalid 'weight' parameter: must be an integer")
            }
        },
    };

    respond(service.rack_default(weight).await)
}

async fn rack_post(service: &RackService, request: &Request) -> Response {
    let payload: RackRequest = match serde_json::from_slice(&request.body) {
        Ok(payload) => payload,
        Err(e) => return Response::bad_request(&e.to_string()),
    };

    respond(service.rack(payload).await)
}

fn respond(result: RackResult<Allocation>) -> Response {
    match result {
        Ok(allocation) => Response::json(200, &allocation),
        Err(RackError::InvalidRequest(reason)) => Response::bad_request(&reason),
        // The service logs the cause with its input; the client sees none of it
        Err(_) => Response::internal_error(),
    }
}
