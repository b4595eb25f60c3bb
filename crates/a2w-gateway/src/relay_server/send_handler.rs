use super::*;

pub(super) async fn handle_health() -> &'static str {
    "ok"
}

/// Relays one Alertmanager notification: parse, render, segment, deliver.
pub(super) async fn handle_send(
    State(state): State<Arc<RelayServerState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RelaySendResponse>, RelayApiError> {
    let Query(pairs) = query.map_err(|rejection| {
        warn!(error = %rejection, "rejecting send request with malformed query");
        RelayApiError::bad_request("invalid_query", rejection.body_text())
    })?;
    let params = SendParams::from_pairs(pairs);

    let body = body.map_err(|rejection| {
        warn!(error = %rejection, "failed to read send request body");
        RelayApiError::bad_request("input_read_failed", rejection.body_text())
    })?;
    debug!(body = %String::from_utf8_lossy(&body), "received notification body");

    let notification = parse_notification(&body).map_err(|error| {
        warn!(error = %error, "failed to parse notification body");
        RelayApiError::bad_request(
            "invalid_notification",
            format!("failed to parse notification: {error}"),
        )
    })?;

    let template_name = resolve_template_name(params.template_prefix.as_deref());
    debug!(template = %template_name, "resolved notification template");
    let rendered = render_notification(&state.config.catalog, &template_name, &notification)
        .map_err(|error| {
            error!(template = %template_name, error = %error, "failed to render notification");
            RelayApiError::internal(error.reason_code(), error.to_string())
        })?;

    let mention_suffix = build_mention_suffix(&params.mentions);
    let segments = segment_message(&rendered, &mention_suffix, &state.config.limits)
        .map_err(|error| {
            warn!(
                template = %template_name,
                rendered_bytes = rendered.len(),
                error = %error,
                "failed to segment rendered notification"
            );
            RelayApiError::bad_request(error.reason_code(), error.to_string())
        })?;
    let contents = segments
        .into_iter()
        .map(|segment| segment.into_content())
        .collect::<Vec<_>>();

    let report = state
        .dispatcher
        .deliver(&params.key, &contents)
        .await
        .map_err(|error| {
            error!(
                reason_code = %error.reason_code,
                segment_index = error.segment_index,
                segment_count = error.segment_count,
                endpoint = %error.endpoint,
                http_status = ?error.http_status,
                detail = %error.detail,
                "failed to deliver notification segment"
            );
            RelayApiError::internal("delivery_failed", error.to_string())
        })?;

    info!(
        receiver = %notification.receiver,
        status = %notification.status,
        alerts = notification.alerts.len(),
        template = %template_name,
        segment_count = report.segment_count,
        "notification relayed"
    );
    Ok(Json(RelaySendResponse {
        status: "sent",
        segment_count: report.segment_count,
    }))
}
