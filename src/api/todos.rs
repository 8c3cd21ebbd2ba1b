use actix_web::http::Method;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::models::todo::{NewTodo, TodoChanges, TodoId};
use crate::repository::database::TodoStore;

type Store = web::Data<dyn TodoStore>;

/// Single entry point for `/api/todos`; the verb picks the operation. The body
/// is only read once a verb that needs it has matched.
pub async fn dispatch(req: HttpRequest, payload: web::Payload, store: Store) -> Result<HttpResponse, ApiError> {
    match *req.method() {
        Method::GET => get_todos(store).await,
        Method::POST => create_todo(store, decode(&req, payload).await?).await,
        Method::PUT => update_todo(store, decode(&req, payload).await?).await,
        Method::DELETE => delete_todo(store, decode(&req, payload).await?).await,
        _ => Err(ApiError::MethodNotAllowed),
    }
}

async fn decode<T: DeserializeOwned>(req: &HttpRequest, payload: web::Payload) -> Result<T, ApiError> {
    let body = web::Bytes::from_request(req, &mut payload.into_inner())
        .await
        .map_err(ApiError::Payload)?;
    Ok(serde_json::from_slice(&body)?)
}

async fn get_todos(store: Store) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || store.list()).await??;
    tracing::debug!(count = todos.len(), "listed todos");
    Ok(HttpResponse::Ok().json(todos))
}

async fn create_todo(store: Store, new_todo: NewTodo) -> Result<HttpResponse, ApiError> {
    let now = Utc::now();
    let todo = web::block(move || store.create(new_todo, now)).await??;
    tracing::info!(id = todo.id, "created todo");
    Ok(HttpResponse::Ok().json(todo))
}

async fn update_todo(store: Store, changes: TodoChanges) -> Result<HttpResponse, ApiError> {
    let id = changes.id;
    let now = Utc::now();
    match web::block(move || store.update(changes, now)).await?? {
        Some(todo) => {
            tracing::info!(id, "updated todo");
            Ok(HttpResponse::Ok().json(todo))
        }
        None => Err(ApiError::NotFound),
    }
}

async fn delete_todo(store: Store, target: TodoId) -> Result<HttpResponse, ApiError> {
    let TodoId { id } = target;
    if !web::block(move || store.delete(id)).await?? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "deleted todo");
    Ok(HttpResponse::NoContent().finish())
}
