use actix_web::{get, web, HttpResponse, Responder, Result};
use serde::{Deserialize, Serialize};

use crate::repository::database::TodoStore;

#[derive(Serialize, Deserialize, Debug)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
pub async fn healthcheck(store: web::Data<dyn TodoStore>) -> impl Responder {
    match web::block(move || store.ping()).await {
        Ok(Ok(())) => HttpResponse::Ok().json(Response {
            message: "Everything is working fine".to_string(),
        }),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "health check failed");
            HttpResponse::ServiceUnavailable().json(Response {
                message: err.to_string(),
            })
        }
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            HttpResponse::ServiceUnavailable().json(Response {
                message: err.to_string(),
            })
        }
    }
}

pub async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}
