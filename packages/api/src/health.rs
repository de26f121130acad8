use axum::response::Json;

use crate::response::Ack;

pub async fn health_check() -> Json<Ack> {
    Ack::ok()
}
