mod bookings;
mod subscription;

pub use bookings::*;
pub use subscription::*;

use actix_web::{HttpResponse, Responder};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
}
