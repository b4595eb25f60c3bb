use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use a2w_gateway::{build_relay_router, RelayServerConfig, RelayServerState};
use a2w_segment::{SegmentHeader, SegmentLimits, MARKDOWN_MAX_BYTES};
use a2w_templates::TemplateCatalog;
use a2w_wecom::{WecomOutboundConfig, WECOM_ACK_BODY};
use anyhow::{Context, Result};
use httpmock::{Method::POST, MockServer};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const REPO_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

fn alert(name: &str, status: &str, summary: &str) -> Value {
    json!({
        "status": status,
        "labels": {"alertname": name, "severity": "critical", "instance": "node-1:9100"},
        "annotations": {"summary": summary},
        "startsAt": "2024-05-01T08:00:00Z",
        "endsAt": "2024-05-01T09:02:03Z",
        "generatorURL": "http://prometheus:9090/graph?g0.expr=up",
        "fingerprint": format!("fp-{name}"),
    })
}

fn notification(alerts: Vec<Value>) -> String {
    json!({
        "version": "4",
        "groupKey": "{}:{alertname=\"DiskFull\"}",
        "truncatedAlerts": 0,
        "receiver": "wecom-ops",
        "status": "firing",
        "alerts": alerts,
        "groupLabels": {"alertname": "DiskFull"},
        "commonLabels": {"severity": "critical"},
        "commonAnnotations": {},
        "externalURL": "http://alertmanager:9093",
    })
    .to_string()
}

async fn spawn_relay(
    template_dir: &Path,
    webhook: &MockServer,
    limits: SegmentLimits,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let catalog = TemplateCatalog::load_dir(template_dir).context("load template catalog")?;
    let state = RelayServerState::new(RelayServerConfig {
        bind: "127.0.0.1:0".to_string(),
        catalog: Arc::new(catalog),
        outbound: WecomOutboundConfig {
            webhook_base: webhook.url("/cgi-bin/webhook/send?key="),
            http_timeout_ms: 2_000,
        },
        limits,
    })?;
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind ephemeral listener")?;
    let addr = listener.local_addr().context("resolve listener addr")?;
    let app = build_relay_router(Arc::new(state));
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok((addr, handle))
}

async fn post_notification(addr: SocketAddr, query: &str, body: String) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/send{query}"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("relay request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("relay response json"))
}

#[tokio::test]
async fn integration_shipped_base_template_relays_single_message() {
    let webhook = MockServer::start();
    let delivered = webhook.mock(|when, then| {
        when.method(POST)
            .path("/cgi-bin/webhook/send")
            .query_param("key", "ops-bot")
            .body_includes("FIRING · DiskFull")
            .body_includes("RESOLVED · HighLatency")
            .body_includes("duration: 1h 2m 3s")
            .body_includes("<@oncall>");
        then.status(200).body(WECOM_ACK_BODY);
    });
    let (addr, handle) = spawn_relay(
        Path::new(REPO_TEMPLATE_DIR),
        &webhook,
        SegmentLimits::default(),
    )
    .await
    .expect("spawn relay");

    let (status, payload) = post_notification(
        addr,
        "?key=ops-bot&mention=oncall",
        notification(vec![
            alert("DiskFull", "firing", "disk almost full"),
            alert("HighLatency", "resolved", "p99 above 2s"),
        ]),
    )
    .await;

    assert_eq!(status, 200, "payload: {payload}");
    assert_eq!(payload["segment_count"], 1);
    delivered.assert_calls(1);

    handle.abort();
}

#[tokio::test]
async fn integration_large_batch_is_split_with_headers_and_mentions_on_every_segment() {
    let webhook = MockServer::start();
    let segment_mocks = (1..=3)
        .map(|index| {
            webhook.mock(move |when, then| {
                when.method(POST)
                    .path("/cgi-bin/webhook/send")
                    .body_includes(format!("**({index}/3)**"))
                    .body_includes("<@alice><@bob>");
                then.status(200).body(WECOM_ACK_BODY);
            })
        })
        .collect::<Vec<_>>();
    let (addr, handle) = spawn_relay(
        Path::new(REPO_TEMPLATE_DIR),
        &webhook,
        SegmentLimits::default(),
    )
    .await
    .expect("spawn relay");

    let alerts = ["A", "B", "C"]
        .iter()
        .map(|name| alert(name, "firing", &name.repeat(3_000)))
        .collect::<Vec<_>>();
    let (status, payload) =
        post_notification(addr, "?key=ops-bot&mention=alice&mention=bob", notification(alerts))
            .await;

    assert_eq!(status, 200, "payload: {payload}");
    assert_eq!(payload["segment_count"], 3);
    for mock in &segment_mocks {
        mock.assert_calls(1);
    }

    handle.abort();
}

#[tokio::test]
async fn integration_custom_template_from_directory_is_selected_by_prefix() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("base.tmpl"), "base {{ receiver }}").expect("write base");
    std::fs::write(
        temp.path().join("brief.tmpl"),
        "brief {{ receiver }} {{ alerts | length }}",
    )
    .expect("write brief");
    let webhook = MockServer::start();
    let brief = webhook.mock(|when, then| {
        when.method(POST).json_body(json!({
            "msgtype": "markdown",
            "markdown": {"content": "brief wecom-ops 1"}
        }));
        then.status(200).body(WECOM_ACK_BODY);
    });
    let (addr, handle) = spawn_relay(temp.path(), &webhook, SegmentLimits::default())
        .await
        .expect("spawn relay");

    let (status, _) = post_notification(
        addr,
        "?key=ops-bot&tmpl=brief",
        notification(vec![alert("DiskFull", "firing", "disk")]),
    )
    .await;

    assert_eq!(status, 200);
    brief.assert_calls(1);

    handle.abort();
}

#[tokio::test]
async fn regression_mid_sequence_delivery_failure_keeps_earlier_segments_sent() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("base.tmpl"),
        r#"{% for alert in alerts %}{% if not loop.first %}{{ "\n\n\n" }}{% endif %}{{ alert.annotations.summary }}{% endfor %}"#,
    )
    .expect("write template");
    let webhook = MockServer::start();
    let first = webhook.mock(|when, then| {
        when.method(POST).body_includes("(1/3)");
        then.status(200).body(WECOM_ACK_BODY);
    });
    let second = webhook.mock(|when, then| {
        when.method(POST).body_includes("(2/3)");
        then.status(200)
            .body(r#"{"errcode":45009,"errmsg":"api freq out of limit"}"#);
    });
    let third = webhook.mock(|when, then| {
        when.method(POST).body_includes("(3/3)");
        then.status(200).body(WECOM_ACK_BODY);
    });
    let limits = SegmentLimits::new(100, SegmentHeader::new("({index}/{count})"));
    let (addr, handle) = spawn_relay(temp.path(), &webhook, limits)
        .await
        .expect("spawn relay");

    let alerts = ["x", "y", "z"]
        .iter()
        .map(|fill| alert("Bulk", "firing", &fill.repeat(80)))
        .collect::<Vec<_>>();
    let (status, payload) = post_notification(addr, "?key=ops-bot", notification(alerts)).await;

    assert_eq!(status, 500);
    assert_eq!(payload["error"]["code"], "delivery_failed");
    first.assert_calls(1);
    second.assert_calls(1);
    third.assert_calls(0);

    handle.abort();
}

#[tokio::test]
async fn regression_paragraph_larger_than_budget_is_rejected_before_delivery() {
    let webhook = MockServer::start();
    let any_delivery = webhook.mock(|when, then| {
        when.method(POST);
        then.status(200).body(WECOM_ACK_BODY);
    });
    let (addr, handle) = spawn_relay(
        Path::new(REPO_TEMPLATE_DIR),
        &webhook,
        SegmentLimits::default(),
    )
    .await
    .expect("spawn relay");

    let (status, payload) = post_notification(
        addr,
        "?key=ops-bot",
        notification(vec![
            alert("Small", "firing", "fine"),
            alert("Huge", "firing", &"h".repeat(MARKDOWN_MAX_BYTES)),
        ]),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(payload["error"]["code"], "segment_fragment_oversized");
    any_delivery.assert_calls(0);

    handle.abort();
}
