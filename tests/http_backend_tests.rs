/// HTTP backend tests against a throwaway local `tiny_http` server.
///
/// Each test starts a server on an ephemeral port that answers a fixed list
/// of canned replies in order and records what it received.
use std::io::Read;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde_json::{Value, json};
use tiny_http::{Method, Response, Server};

use campaign_assistant::analytics::logger::RequestLogger;
use campaign_assistant::api::{Backend, HttpBackend};
use campaign_assistant::config::AssistantConfig;
use campaign_assistant::controller::Controller;
use campaign_assistant::insights::InsightsRequest;
use campaign_assistant::model::{FormInput, Platform};
use campaign_assistant::render::ReportRenderer;
use campaign_assistant::view::Panel;
use campaign_assistant::web::{self, Reply};

struct Seen {
    method: String,
    url: String,
    body: String,
}

fn canned_server(replies: Vec<(u16, String)>) -> (String, JoinHandle<Vec<Seen>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in replies {
            let mut request = server.recv().unwrap();
            let mut content = String::new();
            request.as_reader().read_to_string(&mut content).unwrap();
            seen.push(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: content,
            });
            request
                .respond(Response::from_string(body).with_status_code(status))
                .unwrap();
        }
        seen
    });
    (format!("http://{addr}"), handle)
}

fn backend(url: &str) -> HttpBackend {
    HttpBackend::new(url, Duration::from_secs(5), RequestLogger::disabled())
}

fn temp_log(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir()
        .join("campaign-assistant-http-tests")
        .join(format!("{name}-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn report_request_sends_coerced_json() {
    let (url, server) = canned_server(vec![(
        200,
        json!({ "success": true, "report": { "executive_summary": "ok" }, "campaign_id": 3 }).to_string(),
    )]);

    let form = FormInput::from_pairs([
        ("campaign_name", "Launch"),
        ("budget", "1200.50"),
        ("duration", "14"),
    ]);
    let response = backend(&url).generate_report(&form).unwrap();
    assert!(response.success);
    assert_eq!(response.campaign_id, Some(3));

    let seen = server.join().unwrap();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].url, "/generate-report");
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["budget"], json!(1200.5));
    assert_eq!(body["duration"], json!(14));
    assert_eq!(body["campaign_name"], json!("Launch"));
}

#[test]
fn validation_reply_with_400_is_decoded_and_logged() {
    let (url, server) = canned_server(vec![(
        400,
        json!({ "success": false, "error": "Missing required field: objectives" }).to_string(),
    )]);
    let log = temp_log("rejected");
    let client = HttpBackend::new(&url, Duration::from_secs(5), RequestLogger::at(&log));

    let response = client.generate_report(&FormInput::new()).unwrap();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Missing required field: objectives"));
    server.join().unwrap();

    let entries = RequestLogger::at(&log).read_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, "rejected");
    assert_eq!(entries[0].status, Some(400));
    assert_eq!(entries[0].path, "/generate-report");
}

#[test]
fn html_error_page_is_malformed() {
    let (url, server) = canned_server(vec![(500, "<h1>Internal Server Error</h1>".to_string())]);
    let log = temp_log("malformed");
    let client = HttpBackend::new(&url, Duration::from_secs(5), RequestLogger::at(&log));

    let err = client.connection_status().unwrap_err();
    assert!(!err.is_transport());
    server.join().unwrap();

    let entries = RequestLogger::at(&log).read_all();
    assert_eq!(entries[0].outcome, "malformed");
}

#[test]
fn credential_endpoints_use_platform_slugs() {
    let (url, server) = canned_server(vec![
        (200, json!({ "success": true }).to_string()),
        (200, json!({ "success": false, "error": "Invalid token" }).to_string()),
    ]);
    let client = backend(&url);

    let form = FormInput::from_pairs([("access_token", "abc"), ("app_id", "42")]);
    assert!(client.save_credentials(Platform::MetaAds, &form).unwrap().success);
    let test = client.test_credentials(Platform::MetaAds).unwrap();
    assert_eq!(test.error.as_deref(), Some("Invalid token"));

    let seen = server.join().unwrap();
    assert_eq!(seen[0].url, "/credentials/meta-ads");
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({ "access_token": "abc", "app_id": "42" }));
    assert_eq!(seen[1].url, "/credentials/meta-ads/test");
}

#[test]
fn insights_request_body() {
    let (url, server) = canned_server(vec![(200, json!({ "success": true, "insights": {} }).to_string())]);
    let request = InsightsRequest::from_form(&FormInput::from_pairs([
        ("target_audience", "Students"),
        ("budget", "300"),
    ]))
    .unwrap();

    backend(&url).audience_insights(&request).unwrap();

    let seen = server.join().unwrap();
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["target_audience"], json!("Students"));
    assert_eq!(body["budget"], json!(300.0));
    assert_eq!(body["estimated_audience_size"], json!(10000));
    assert_eq!(body["include_real_data"], json!(false));
}

#[test]
fn zero_timeout_still_completes_requests() {
    let (url, server) = canned_server(vec![(
        200,
        json!({ "success": true, "status": { "total_connected": 0 } }).to_string(),
    )]);
    let client = HttpBackend::new(&url, Duration::ZERO, RequestLogger::disabled());
    let response = client.connection_status().unwrap();
    assert!(response.success);
    server.join().unwrap();
}

#[test]
fn campaigns_listing_decodes() {
    let (url, server) = canned_server(vec![(
        200,
        json!({
            "success": true,
            "campaigns": [
                { "id": 2, "campaign_name": "Holiday Push", "budget": 8000.0, "duration": 45, "created_at": "2024-11-02T10:00:00" },
                { "id": 1, "campaign_name": "Spring Launch", "budget": 5000.0, "duration": 30 }
            ]
        })
        .to_string(),
    )]);

    let response = backend(&url).list_campaigns().unwrap();
    assert_eq!(response.campaigns.len(), 2);
    assert_eq!(response.campaigns[0].id, Some(2));
    assert_eq!(response.campaigns[1].duration, Some(30));
    server.join().unwrap();
}

#[test]
fn saved_campaign_reports_fetch_and_render() {
    let (url, server) = canned_server(vec![(
        200,
        json!({
            "success": true,
            "campaign": {
                "id": 3,
                "campaign_name": "Spring Launch",
                "budget": 5000.0,
                "duration": 30,
                "reports": [
                    {
                        "id": 11,
                        "campaign_id": 3,
                        "report_data": {
                            "campaign_metadata": { "campaign_name": "Spring Launch" },
                            "executive_summary": "Lead with video."
                        },
                        "generated_at": "2026-03-01T10:00:00"
                    },
                    { "id": 12, "campaign_id": 3, "report_data": null }
                ]
            }
        })
        .to_string(),
    )]);

    let response = backend(&url).get_campaign(3).unwrap();
    assert!(response.success);
    let detail = response.campaign.unwrap();
    assert_eq!(detail.campaign.id, Some(3));
    assert_eq!(detail.campaign.duration, Some(30));
    assert_eq!(detail.reports.len(), 2);
    assert!(detail.reports[1].report_data.is_none());

    let html = ReportRenderer::default().render(detail.reports[0].report_data.as_ref().unwrap());
    assert!(html.contains("Campaign: Spring Launch"));
    assert!(html.contains("<p>Lead with video.</p>"));

    let seen = server.join().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/campaigns/3");
}

#[test]
fn missing_campaign_reports_backend_error() {
    let (url, server) = canned_server(vec![(
        500,
        json!({ "success": false, "error": "Failed to fetch campaign: 404 Not Found" }).to_string(),
    )]);

    let response = backend(&url).get_campaign(99).unwrap();
    assert!(!response.success);
    assert!(response.campaign.is_none());
    assert_eq!(
        response.error.as_deref(),
        Some("Failed to fetch campaign: 404 Not Found")
    );
    server.join().unwrap();
}

#[test]
fn reports_listing_decodes() {
    let (url, server) = canned_server(vec![(
        200,
        json!({
            "success": true,
            "reports": [
                { "id": 12, "campaign_id": 4, "report_data": { "next_steps": ["Launch"] },
                  "generated_at": "2026-03-02T09:00:00" },
                { "id": 11, "campaign_id": 3, "report_data": { "executive_summary": "Go" } }
            ]
        })
        .to_string(),
    )]);

    let response = backend(&url).list_reports().unwrap();
    assert_eq!(response.reports.len(), 2);
    assert_eq!(response.reports[0].campaign_id, Some(4));
    let first = response.reports[0].report_data.as_ref().unwrap();
    assert!(ReportRenderer::default().render(first).contains("<li>Launch</li>"));

    let seen = server.join().unwrap();
    assert_eq!(seen[0].url, "/reports");
}

#[test]
fn web_form_post_then_page() {
    let (url, server) = canned_server(vec![(
        200,
        json!({
            "success": true,
            "report": { "executive_summary": "Focus on short-form video." }
        })
        .to_string(),
    )]);

    let mut config = AssistantConfig::default();
    config.features.integrations = false;
    let mut controller = Controller::new(backend(&url), &config);

    let body = "campaign_name=Launch&target_audience=Makers&budget=900&duration=10&objectives=Sales&channels=";
    let reply = web::handle(&mut controller, &Method::Post, "/report", Some(body)).unwrap();
    assert_eq!(reply, Reply::Redirect("/"));
    assert_eq!(controller.view().panel, Panel::Report);

    let Reply::Page(page) = web::handle(&mut controller, &Method::Get, "/", None).unwrap() else {
        panic!("expected a page");
    };
    assert!(page.contains("Focus on short-form video."));
    assert!(page.contains("value=\"Launch\""));

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 1);
}

#[test]
fn web_unknown_routes_and_disabled_modules_are_not_found() {
    let mut config = AssistantConfig::default();
    config.features.integrations = false;
    let mut controller = Controller::new(backend("http://127.0.0.1:9"), &config);

    let reply = web::handle(&mut controller, &Method::Get, "/nope", None).unwrap();
    assert_eq!(reply, Reply::NotFound);
    let reply = web::handle(&mut controller, &Method::Post, "/integrations/google-ads/test", Some("")).unwrap();
    assert_eq!(reply, Reply::NotFound);
    let reply = web::handle(&mut controller, &Method::Post, "/integrations/tiktok", Some("")).unwrap();
    assert_eq!(reply, Reply::NotFound);
}
