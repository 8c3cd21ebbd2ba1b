use actix_web::web;

pub mod error;
pub mod health;
pub mod todos;

pub use health::not_found;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(web::resource("/todos").to(todos::dispatch)))
        .service(health::healthcheck);
}
