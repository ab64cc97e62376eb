use axum::{extract::State, Json};

use crate::error::AppError;
use crate::webhook::{Report, SharedWebhookService, WebhookForm};

pub async fn send_webhook(
    State(service): State<SharedWebhookService>,
    Json(form): Json<WebhookForm>,
) -> Result<Json<Report>, AppError> {
    let spec = form.compose().inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected webhook form");
    })?;

    tracing::debug!(
        method = %spec.method,
        url = %spec.url,
        "Sending webhook"
    );

    let outcome = service.execute(spec).await;
    let report = Report::new(outcome);

    tracing::debug!(
        kind = ?report.status.kind,
        message = %report.status.message,
        "Webhook finished"
    );

    Ok(Json(report))
}
