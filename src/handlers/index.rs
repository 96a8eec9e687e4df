/// Landing route, plain text.
#[tracing::instrument]
pub async fn welcome() -> &'static str {
    "Bienvenido a la API de horarios de trenes"
}
