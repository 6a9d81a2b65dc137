//! Local web UI for the campaign assistant.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that paints the page on
//! the server. Every form posts back to this server, which runs the matching
//! controller operation and redirects to `/` (post/redirect/get), so the
//! browser always shows the painted current state:
//!
//! - `GET /`: the page
//! - `GET /integrations`: refresh connection status, then the page
//! - `POST /report`, `POST /reset`
//! - `POST /integrations/<slug>`, `POST /integrations/<slug>/test`
//! - `POST /insights`
//!
//! Launched via `campaign-assistant serve` (default: `http://127.0.0.1:9747`).

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::{Backend, HttpBackend};
use crate::config::AssistantConfig;
use crate::controller::{Controller, ControllerError};
use crate::model::{FormInput, Platform};

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web UI against the configured backend.
///
/// Blocks the current thread. Handles requests sequentially, so at most one
/// backend call is ever in flight.
pub fn serve(config: &AssistantConfig) -> Result<()> {
    let addr = config.web.addr.as_str();
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let mut controller = Controller::new(HttpBackend::from_config(config), config);
    controller.init();

    println!("campaign assistant running at http://{addr}");
    println!("Backend: {}", controller.backend().base_url());
    println!("Press Ctrl+C to stop.\n");

    if config.web.open_browser {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if method == Method::Post {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let reply = match handle(&mut controller, &method, &url, body.as_deref()) {
            Ok(reply) => reply,
            Err(e) => Reply::Failure(e.to_string()),
        };
        let status = reply.status();
        let _ = request.respond(reply.into_response());

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// What the server sends back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Page(String),
    /// `303 See Other` to the given location.
    Redirect(&'static str),
    NotFound,
    Failure(String),
}

impl Reply {
    pub fn status(&self) -> u16 {
        match self {
            Self::Page(_) => 200,
            Self::Redirect(_) => 303,
            Self::NotFound => 404,
            Self::Failure(_) => 500,
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let status = StatusCode(self.status());
        let (body, name, value) = match self {
            Self::Page(html) => (html.into_bytes(), "Content-Type", "text/html; charset=utf-8"),
            Self::Redirect(location) => (Vec::new(), "Location", location),
            Self::NotFound => (b"not found".to_vec(), "Content-Type", "text/plain; charset=utf-8"),
            Self::Failure(message) => (message.into_bytes(), "Content-Type", "text/plain; charset=utf-8"),
        };
        let response = Response::from_data(body).with_status_code(status);
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

/// Dispatch one request to the controller.
pub fn handle<B: Backend>(
    controller: &mut Controller<B>,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Reply> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);
    let form = || decode_form(body.unwrap_or(""));

    let outcome = match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            return Ok(Reply::Page(controller.page()));
        }
        (&Method::Get, "/integrations") => controller.activate_integrations().map(|_| ()),
        (&Method::Post, "/report") => controller.submit_report(&form()).map(|_| ()),
        (&Method::Post, "/reset") => controller.reset().map(|_| ()),
        (&Method::Post, "/insights") => controller.submit_insights(&form()).map(|_| ()),
        (&Method::Post, route) if route.starts_with("/integrations/") => {
            let rest = &route["/integrations/".len()..];
            let (slug, test) = match rest.strip_suffix("/test") {
                Some(slug) => (slug, true),
                None => (rest, false),
            };
            let Some(platform) = Platform::parse(slug) else {
                return Ok(Reply::NotFound);
            };
            if test {
                controller.test_connection(platform)
            } else {
                controller.submit_credentials(platform, &form())
            }
        }
        _ => return Ok(Reply::NotFound),
    };

    match outcome {
        Ok(()) if path == "/integrations" => Ok(Reply::Page(controller.page())),
        Ok(()) => Ok(Reply::Redirect("/")),
        Err(ControllerError::FeatureDisabled(_)) => Ok(Reply::NotFound),
        Err(e) => Err(e).with_context(|| format!("{method} {path}")),
    }
}

/// Decode an `application/x-www-form-urlencoded` body.
pub fn decode_form(body: &str) -> FormInput {
    FormInput::from_pairs(url::form_urlencoded::parse(body.as_bytes()).into_owned())
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_urlencoded_form() {
        let form = decode_form("campaign_name=Spring+Launch&budget=5000&objectives=a%26b");
        assert_eq!(form.get("campaign_name"), Some("Spring Launch"));
        assert_eq!(form.get("budget"), Some("5000"));
        assert_eq!(form.get("objectives"), Some("a&b"));
    }

    #[test]
    fn empty_body_is_empty_form() {
        assert!(decode_form("").is_empty());
    }

    #[test]
    fn reply_status_codes() {
        assert_eq!(Reply::Redirect("/").status(), 303);
        assert_eq!(Reply::NotFound.status(), 404);
        assert_eq!(Reply::Page(String::new()).status(), 200);
    }
}
