//! Paint step: turn the current state into a complete HTML page.
use std::fmt::Write as _;

use super::assets::{LOADING_BODY, PAGE_FOOT, PAGE_HEAD, WELCOME_BODY};
use super::{Panel, SubmitButton, ViewState};
use crate::notify::Notification;
use crate::render::escape;
use crate::validate::FormState;

/// Everything the page shows besides the view state itself.
pub struct PageParts<'a> {
    pub view: &'a ViewState,
    pub form: &'a FormState,
    /// Integrations card, when the module is enabled.
    pub integrations: Option<String>,
    /// Audience insights card, when the module is enabled.
    pub insights: Option<String>,
    pub notifications: &'a [Notification],
}

enum Input {
    Line(&'static str),
    Number(&'static str),
    Area,
}

fn field_meta(name: &str) -> (&'static str, Input) {
    match name {
        "campaign_name" => ("Campaign Name", Input::Line("e.g. Spring Product Launch")),
        "target_audience" => ("Target Audience", Input::Area),
        "budget" => ("Budget ($)", Input::Number("0.01")),
        "duration" => ("Duration (days)", Input::Number("1")),
        "objectives" => ("Campaign Objectives", Input::Area),
        "channels" => ("Marketing Channels", Input::Line("e.g. Social media, Email, Search")),
        "current_metrics" => ("Current Metrics", Input::Area),
        _ => ("", Input::Line("")),
    }
}

/// Render the full page.
pub fn paint(parts: &PageParts<'_>) -> String {
    let mut out = String::from(PAGE_HEAD);

    if !parts.notifications.is_empty() {
        out.push_str("<div class=\"toasts\">");
        for note in parts.notifications {
            let _ = write!(
                out,
                "<div class=\"alert alert-{}\" role=\"status\">{}</div>",
                note.severity.css_class(),
                escape(&note.message)
            );
        }
        out.push_str("</div>\n");
    }

    out.push_str("<div class=\"layout\">\n<aside>\n");
    paint_form(&mut out, parts.form, parts.view.submit);
    out.push_str("</aside>\n<main>\n");
    paint_panels(&mut out, parts.view);
    if let Some(html) = &parts.insights {
        out.push_str(html);
    }
    if let Some(html) = &parts.integrations {
        out.push_str(html);
    }
    out.push_str("</main>\n</div>\n");

    out.push_str(PAGE_FOOT);
    out
}

fn paint_form(out: &mut String, form: &FormState, submit: SubmitButton) {
    out.push_str(
        "<div class=\"card\"><h2><i class=\"fas fa-edit\"></i> Campaign Details</h2>\
         <form id=\"campaignForm\" method=\"post\" action=\"/report\" novalidate>",
    );

    for rule in form.rules() {
        let (label, input) = field_meta(rule.name);
        let value = escape(form.values().get(rule.name).unwrap_or(""));
        let error = form.error(rule.name);
        let invalid = if error.is_some() { " is-invalid" } else { "" };
        let required = if rule.required { " required" } else { "" };

        let _ = write!(
            out,
            "<div class=\"form-group\"><label for=\"{name}\">{label}</label>",
            name = rule.name
        );
        let _ = match input {
            Input::Area => write!(
                out,
                "<textarea class=\"form-control{invalid}\" id=\"{name}\" name=\"{name}\" rows=\"3\"{required}>{value}</textarea>",
                name = rule.name
            ),
            Input::Number(step) => write!(
                out,
                "<input type=\"number\" step=\"{step}\" class=\"form-control{invalid}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{required}>",
                name = rule.name
            ),
            Input::Line(placeholder) => write!(
                out,
                "<input type=\"text\" class=\"form-control{invalid}\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\"{required}>",
                name = rule.name
            ),
        };
        if let Some(error) = error {
            let _ = write!(out, "<div class=\"invalid-feedback\">{error}</div>");
        }
        out.push_str("</div>");
    }

    let (disabled, text_class, loading_class) = match submit {
        SubmitButton::Idle => ("", "btn-text", "btn-loading d-none"),
        SubmitButton::Busy => (" disabled", "btn-text d-none", "btn-loading"),
    };
    let _ = write!(
        out,
        "<button type=\"submit\" class=\"btn btn-primary\" id=\"submitBtn\"{disabled}>\
         <span class=\"{text_class}\"><i class=\"fas fa-magic\"></i> Generate Report</span>\
         <span class=\"{loading_class}\"><span class=\"spinner\"></span> Generating...</span>\
         </button></form></div>\n"
    );
}

fn paint_panels(out: &mut String, view: &ViewState) {
    for panel in Panel::ALL {
        let mut class = String::from("card");
        if panel != view.panel {
            class.push_str(" d-none");
        }
        if view.entry_animation == Some(panel) {
            class.push_str(" fade-in");
        }
        let _ = write!(out, "<section id=\"{}\" class=\"{class}\">", panel.element_id());

        match panel {
            Panel::Welcome => out.push_str(WELCOME_BODY),
            Panel::Loading => out.push_str(LOADING_BODY),
            Panel::Error => {
                let message = view.error_message.as_deref().unwrap_or("");
                let _ = write!(
                    out,
                    "<div class=\"alert alert-danger\"><i class=\"fas fa-exclamation-triangle\"></i> \
                     <span id=\"errorMessage\">{}</span></div>\
                     <form method=\"post\" action=\"/reset\"><button type=\"submit\" class=\"btn btn-secondary\">Try Again</button></form>",
                    escape(message)
                );
            }
            Panel::Report => {
                if let Some(html) = &view.report_html {
                    out.push_str(html);
                }
            }
        }
        out.push_str("</section>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::view::ViewEvent;

    fn page(view: &ViewState, form: &FormState) -> String {
        paint(&PageParts {
            view,
            form,
            integrations: None,
            insights: None,
            notifications: &[],
        })
    }

    fn section<'a>(html: &'a str, panel: Panel) -> &'a str {
        let start = html
            .find(&format!("<section id=\"{}\"", panel.element_id()))
            .unwrap();
        let end = start + html[start..].find("</section>").unwrap();
        &html[start..end]
    }

    fn hidden(html: &str, panel: Panel) -> bool {
        let sec = section(html, panel);
        let tag_end = sec.find('>').unwrap();
        sec[..tag_end].contains("d-none")
    }

    #[test]
    fn exactly_one_panel_visible() {
        let form = FormState::report();
        let html = page(&ViewState::new(), &form);
        let visible: Vec<_> = Panel::ALL.into_iter().filter(|p| !hidden(&html, *p)).collect();
        assert_eq!(visible, [Panel::Welcome]);
    }

    #[test]
    fn busy_button_is_disabled() {
        let form = FormState::report();
        let loading = ViewState::new().apply(ViewEvent::Submit).unwrap();
        let html = page(&loading, &form);
        assert!(html.contains("id=\"submitBtn\" disabled"));
        assert!(html.contains("<span class=\"btn-text d-none\">"));
        assert!(!hidden(&html, Panel::Loading));
        assert!(section(&html, Panel::Loading).contains("fade-in"));
    }

    #[test]
    fn error_message_is_escaped() {
        let form = FormState::report();
        let state = ViewState::new()
            .apply(ViewEvent::Rejected("<b>bad</b>".into()))
            .unwrap();
        let html = page(&state, &form);
        assert!(section(&html, Panel::Error).contains("&lt;b&gt;bad&lt;/b&gt;"));
    }

    #[test]
    fn inline_errors_mark_fields() {
        let mut form = FormState::report();
        form.set_value("budget", "-3");
        let _ = form.blur("budget");
        let html = page(&ViewState::new(), &form);
        assert!(html.contains("class=\"form-control is-invalid\" id=\"budget\""));
        assert!(html.contains("Budget must be a positive number"));
    }

    #[test]
    fn notifications_become_toasts() {
        let mut notifier = Notifier::new();
        notifier.success("Meta Ads connected successfully!");
        let pending = notifier.drain();
        let form = FormState::report();
        let view = ViewState::new();
        let html = paint(&PageParts {
            view: &view,
            form: &form,
            integrations: Some("<div id=\"integrations\"></div>".into()),
            insights: None,
            notifications: &pending,
        });
        assert!(html.contains("alert alert-success"));
        assert!(html.contains("Meta Ads connected successfully!"));
        assert!(html.contains("<div id=\"integrations\"></div>"));
    }
}
