//! Static page chrome for the campaign assistant UI.
//!
//! Compiled into the binary as string constants. No external assets, no
//! build tools, no CDN dependencies; icon classes degrade to nothing when no
//! icon font is loaded.

/// Document head and opening of the page body.
pub const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Marketing Campaign Assistant</title>
<style>
:root {
  --bg: #f5f7fb;
  --surface: #ffffff;
  --border: #dde3ec;
  --text: #1f2933;
  --text-muted: #616e7c;
  --accent: #2f6fed;
  --green: #1f9d55;
  --yellow: #c58a00;
  --red: #d64545;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 15px;
  line-height: 1.5;
}

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }
header { margin-bottom: 24px; padding-bottom: 16px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 24px; font-weight: 600; }
.layout { display: grid; grid-template-columns: 380px 1fr; gap: 24px; }
@media (max-width: 900px) { .layout { grid-template-columns: 1fr; } }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 24px;
}
.card h2 { font-size: 18px; margin-bottom: 12px; }

/* Forms */
.form-group { margin-bottom: 14px; }
.form-group label { display: block; font-weight: 600; margin-bottom: 4px; }
.form-control {
  width: 100%;
  padding: 8px 10px;
  border: 1px solid var(--border);
  border-radius: 6px;
  font: inherit;
}
.form-control.is-invalid { border-color: var(--red); }
.invalid-feedback { color: var(--red); font-size: 13px; margin-top: 4px; }
.btn {
  display: inline-block;
  padding: 8px 16px;
  border: none;
  border-radius: 6px;
  font: inherit;
  cursor: pointer;
}
.btn-primary { background: var(--accent); color: #fff; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn[disabled] { opacity: 0.6; cursor: not-allowed; }

/* Panels */
.d-none { display: none !important; }
.fade-in { animation: fadeIn 0.4s ease-in; }
@keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }
.spinner { display: inline-block; width: 16px; height: 16px; border: 2px solid currentColor;
  border-right-color: transparent; border-radius: 50%; animation: spin 0.8s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }

/* Report */
.report-header { border-bottom: 2px solid var(--accent); margin-bottom: 16px; padding-bottom: 8px; }
.report-section { margin-bottom: 20px; }
.report-section h4 { font-size: 16px; margin-bottom: 8px; color: var(--accent); }
.metric-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
.metric-item { background: var(--bg); border-radius: 6px; padding: 10px; }
.metric-label { display: block; color: var(--text-muted); font-size: 12px; }
.metric-value { display: block; font-weight: 600; }

/* Integrations */
.status-badge { font-size: 12px; padding: 2px 8px; border-radius: 10px; }
.status-connected { background: #e3f6ea; color: var(--green); }
.status-disconnected { background: #fbe9e9; color: var(--red); }
.status-testing { background: #fff4d6; color: var(--yellow); }
.alert { padding: 10px 14px; border-radius: 6px; margin-bottom: 12px; }
.alert-success { background: #e3f6ea; }
.alert-warning { background: #fff4d6; }
.alert-danger { background: #fbe9e9; }
.alert-info { background: #e6efff; }

/* Insights */
.insight-section { margin-top: 20px; }
.insight-section h3 { font-size: 16px; margin-bottom: 10px; }
.overview-grid, .segmentation-grid, .targeting-recommendations {
  display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 12px; }
.overview-card, .segment-card, .recommendation-card { background: var(--bg); border-radius: 6px; padding: 12px; }
.behavior-tag { display: inline-block; background: #e6efff; border-radius: 10px; padding: 2px 8px;
  margin: 2px; font-size: 12px; }
.quality-metrics { display: flex; gap: 16px; flex-wrap: wrap; }
.budget-item { display: flex; justify-content: space-between; }

/* Toasts */
.toasts { position: fixed; top: 16px; right: 16px; width: 320px; z-index: 10; }
</style>
</head>
<body>
<div class="app">
<header><h1><i class="fas fa-chart-line"></i> Marketing Campaign Assistant</h1></header>
"##;

/// Closing tags for [`PAGE_HEAD`].
pub const PAGE_FOOT: &str = "</div>\n</body>\n</html>\n";

/// Welcome panel body.
pub const WELCOME_BODY: &str = "<h2><i class=\"fas fa-bullhorn\"></i> Welcome</h2>\
<p>Describe your campaign on the left and generate a strategy report with \
budget analysis, audience insights, channel optimization and next steps.</p>";

/// Loading panel body.
pub const LOADING_BODY: &str = "<p><span class=\"spinner\"></span> \
Generating your campaign report. This can take a minute...</p>";
