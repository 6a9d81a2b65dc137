use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod cli;

#[derive(Debug, Parser)]
#[command(name = "campaign-assistant")]
#[command(about = "Marketing campaign report assistant")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate campaign details and generate a strategy report
    Report {
        #[command(flatten)]
        campaign: CampaignArgs,
        /// Output format: text (default) or html
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate deep audience insights for a target audience
    Insights {
        /// Description of the target audience
        #[arg(long)]
        target_audience: String,
        /// Campaign budget in dollars
        #[arg(long)]
        budget: Option<String>,
        /// Estimated audience size (default: 10000)
        #[arg(long)]
        audience_size: Option<String>,
        #[arg(long)]
        campaign_name: Option<String>,
        #[arg(long)]
        objectives: Option<String>,
        /// Include data from connected ad platforms
        #[arg(long)]
        real_data: bool,
        /// Output format: text (default) or html
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show ad platform connection status
    Status,
    /// Save credentials for an ad platform (google-ads or meta-ads)
    Connect {
        platform: String,
        /// Credential field as name=value; repeat for each field
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Test stored credentials for an ad platform
    TestConnection { platform: String },
    /// List saved campaigns, or show one with its reports
    Campaigns {
        #[command(subcommand)]
        action: Option<CampaignsAction>,
    },
    /// Render a saved report or insights JSON document without calling the backend
    Render {
        /// Document kind: report or insights
        kind: String,
        /// Path to the JSON file (the payload itself or a full response envelope)
        file: String,
        /// Output format: text (default) or html
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Start the local web UI
    Serve {
        /// Listen address (overrides [web] addr)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Summarize the backend request log
    Activity {
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
        /// Output format: table (default) or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Args)]
struct CampaignArgs {
    #[arg(long)]
    campaign_name: Option<String>,
    #[arg(long)]
    target_audience: Option<String>,
    /// Budget in dollars
    #[arg(long)]
    budget: Option<String>,
    /// Duration in days
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    objectives: Option<String>,
    #[arg(long)]
    channels: Option<String>,
    #[arg(long)]
    current_metrics: Option<String>,
}

#[derive(Debug, Subcommand)]
enum CampaignsAction {
    /// List saved campaigns (default)
    List,
    /// Show a campaign and render every report saved for it
    Show {
        id: i64,
        /// Output format: text (default) or html
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every saved report, newest first
    Reports,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config file to ~/.campaign-assistant/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `backend.url http://127.0.0.1:5000`
    Set { key: String, value: String },
    /// Reset the global config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Report { campaign, format } => {
            let fields = [
                ("campaign_name", campaign.campaign_name),
                ("target_audience", campaign.target_audience),
                ("budget", campaign.budget),
                ("duration", campaign.duration),
                ("objectives", campaign.objectives),
                ("channels", campaign.channels),
                ("current_metrics", campaign.current_metrics),
            ];
            cli::run_report(&fields, cli::OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Insights {
            target_audience,
            budget,
            audience_size,
            campaign_name,
            objectives,
            real_data,
            format,
        } => {
            let fields = [
                ("target_audience", Some(target_audience)),
                ("budget", budget),
                ("estimated_audience_size", audience_size),
                ("campaign_name", campaign_name),
                ("objectives", objectives),
                ("include_real_data", real_data.then(|| "on".to_string())),
            ];
            cli::run_insights(&fields, cli::OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Status => cli::run_status(),
        Commands::Connect { platform, fields } => cli::run_connect(&platform, &fields),
        Commands::TestConnection { platform } => cli::run_test_connection(&platform),
        Commands::Campaigns { action } => match action.unwrap_or(CampaignsAction::List) {
            CampaignsAction::List => cli::run_campaigns(),
            CampaignsAction::Show { id, format } => {
                cli::run_campaign_show(id, cli::OutputFormat::from_str_opt(Some(&format)))
            }
            CampaignsAction::Reports => cli::run_reports(),
        },
        Commands::Render { kind, file, format } => {
            cli::run_render(&kind, &file, cli::OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Serve { addr, no_browser } => cli::run_serve(addr, no_browser),
        Commands::Activity { days, format } => cli::run_activity(days, &format),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
