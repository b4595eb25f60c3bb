use super::*;

#[derive(Debug)]
pub(super) struct RelayApiError {
    pub(super) status: StatusCode,
    pub(super) code: &'static str,
    pub(super) message: String,
}

impl RelayApiError {
    pub(super) fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub(super) fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub(super) fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": {
                    "code": self.code,
                    "message": self.message,
                }
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RelaySendResponse {
    pub(super) status: &'static str,
    pub(super) segment_count: usize,
}

/// Query parameters of `/send`. `mention` may repeat; the first `key` and
/// `tmpl` win.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct SendParams {
    pub(super) key: String,
    pub(super) template_prefix: Option<String>,
    pub(super) mentions: Vec<String>,
}

impl SendParams {
    pub(super) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut key = None;
        let mut template_prefix = None;
        let mut mentions = Vec::new();
        for (name, value) in pairs {
            match name.as_str() {
                "key" => {
                    key.get_or_insert(value);
                }
                "tmpl" => {
                    template_prefix.get_or_insert(value);
                }
                "mention" => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        mentions.push(trimmed.to_string());
                    }
                }
                _ => {}
            }
        }
        Self {
            key: key.unwrap_or_default(),
            template_prefix,
            mentions,
        }
    }
}
