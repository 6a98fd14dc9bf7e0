//! UIResearch client - Entry Point
//!
//! Drives the search, session, and pricing controllers from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uiresearch_client::messages::StatusMessage;
use uiresearch_client::search::{HAS_ABSTRACT, fields};
use uiresearch_client::session::{AuthForm, SignupForm};
use uiresearch_client::{
    ApiClient, BillingPeriod, Config, FileTokenStore, Plan, PlanSelection, PricingPage,
    SearchController, SearchForm, SearchQuery, SessionManager,
};

#[derive(Parser, Debug)]
#[command(name = "uiresearch")]
#[command(about = "Search academic references and manage your UIResearch session")]
#[command(version)]
struct Cli {
    /// Server origin
    #[arg(long, env = "UIRESEARCH_BASE_URL")]
    base_url: Option<String>,

    /// File holding the session token
    #[arg(long, env = "UIRESEARCH_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for references
    Search {
        #[command(flatten)]
        filters: SearchArgs,

        /// Print the rendered result cards instead of a text listing
        #[arg(long)]
        html: bool,
    },
    /// Export a search as CSV
    Export {
        #[command(flatten)]
        filters: SearchArgs,

        /// Download to this file instead of printing the download URL
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "UIRESEARCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "UIRESEARCH_PASSWORD", hide_env_values = true)]
        password: String,

        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,

        #[arg(long, default_value = "")]
        full_name: String,

        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show plan prices
    Pricing {
        /// Show yearly billing
        #[arg(long)]
        yearly: bool,
    },
    /// Choose a plan
    SelectPlan {
        /// free, pro, team or academic
        plan: Plan,

        /// Bill yearly
        #[arg(long)]
        yearly: bool,
    },
}

/// Search form fields.
#[derive(Args, Debug)]
struct SearchArgs {
    /// Search keywords
    query: String,

    #[arg(long, default_value = "2023-01-01")]
    from_date: String,

    #[arg(long, default_value = "2025-12-31")]
    until_date: String,

    /// journal-article, proceedings-article or book-chapter
    #[arg(long, default_value = "journal-article")]
    content_type: String,

    /// Include references without an abstract
    #[arg(long)]
    no_abstract: bool,

    #[arg(long, default_value_t = 30)]
    rows: u32,

    #[arg(long, default_value_t = 120)]
    max_results: u32,

    /// relevance or published
    #[arg(long, default_value = "relevance")]
    sort: String,
}

impl SearchArgs {
    fn to_form(&self) -> SearchForm {
        let mut form = SearchForm::new()
            .with(fields::QUERY, self.query.as_str())
            .with(fields::FROM_DATE, self.from_date.as_str())
            .with(fields::UNTIL_DATE, self.until_date.as_str())
            .with(fields::CONTENT_TYPE, self.content_type.as_str())
            .with(fields::ROWS, self.rows.to_string())
            .with(fields::MAX_RESULTS, self.max_results.to_string())
            .with(fields::SORT, self.sort.as_str());
        form.set_checked(HAS_ABSTRACT, !self.no_abstract);
        form
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn print_status(status: Option<&StatusMessage>) {
    if let Some(status) = status {
        println!("[{}] {}", status.kind, status.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token_file) = cli.token_file {
        config.token_file = token_file;
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        "Starting UIResearch client"
    );

    let client = ApiClient::new(&config)?;
    let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let session = SessionManager::new(client.clone(), store)
        .with_storage_key(config.storage_key.clone());

    match cli.command {
        Command::Search { filters, html } => {
            let mut search = SearchController::new(client, config.export_notice_delay);
            let view = search.submit(&filters.to_form()).await.clone();

            print_status(view.status.as_ref());
            if html {
                println!("{}", view.results_html);
            } else {
                for item in search.results() {
                    let year = item.year.map(|y| format!(" ({y})")).unwrap_or_default();
                    println!(
                        "\n{}{year}\n  {}\n  {}\n  {}",
                        item.title, item.authors, item.journal, item.url
                    );
                }
            }
            if view.export_visible {
                println!("\nExport: uiresearch export {:?}", filters.query);
            }
        }
        Command::Export { filters, output } => {
            let form = filters.to_form();
            match output {
                Some(path) => {
                    let bytes = client.download_csv(&SearchQuery::from_form(&form)).await?;
                    tokio::fs::write(&path, bytes).await?;
                    println!("{}: {}", uiresearch_client::messages::EXPORT_DONE, path.display());
                }
                None => {
                    let mut search = SearchController::new(client, config.export_notice_delay);
                    let url = search.export_and_notify(&form).await?;
                    println!("{url}");
                    print_status(search.view().status.as_ref());
                }
            }
        }
        Command::Login { email, password } => {
            if let Some(redirect) = session.redirect_if_logged_in() {
                println!("Already logged in (redirect to {})", redirect.location);
                return Ok(());
            }
            let mut form = AuthForm::new();
            session.submit_login(&mut form, &email, &password).await;
            print_auth_form(&form);
        }
        Command::Register { email, password, confirm_password, full_name, accept_terms } => {
            if let Some(redirect) = session.redirect_if_logged_in() {
                println!("Already logged in (redirect to {})", redirect.location);
                return Ok(());
            }
            let signup = SignupForm {
                full_name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                terms_accepted: accept_terms,
            };
            let mut form = AuthForm::new();
            session.submit_register(&mut form, &signup).await;
            print_auth_form(&form);
        }
        Command::Logout => {
            let mut view = session.auth_view();
            println!("{}", session.logout(&mut view));
        }
        Command::Whoami => {
            let view = session.refresh_auth_ui().await;
            match (view.user_menu_visible(), view.display_name()) {
                (true, Some(name)) => println!("{name}"),
                (true, None) => println!("Logged in (profile unavailable)"),
                (false, _) => println!("Not logged in"),
            }
        }
        Command::Pricing { yearly } => {
            let mut page = PricingPage::with_plan_table();
            page.toggle(yearly);
            if let Some(plan) = page.current_plan(&session).await {
                println!("Current plan: {}", plan.display_name());
            }
            let paid = [Plan::Pro, Plan::Team, Plan::Academic];
            for (plan, price) in paid.iter().zip(page.prices()) {
                println!(
                    "{:<10} {}{}",
                    plan.display_name(),
                    price.amount,
                    price.unit_label.as_deref().unwrap_or_default()
                );
            }
        }
        Command::SelectPlan { plan, yearly } => {
            let mut page = PricingPage::with_plan_table();
            page.set_period(BillingPeriod::from_yearly(yearly));
            match page.select_plan(plan, &session) {
                PlanSelection::Signup(redirect) => println!("Sign up at {}", redirect.location),
                PlanSelection::AlreadyFree { message }
                | PlanSelection::CheckoutPending { message, .. } => println!("{message}"),
            }
        }
    }

    Ok(())
}

fn print_auth_form(form: &AuthForm) {
    if let Some(error) = &form.error {
        eprintln!("{error}");
    }
    if let Some(success) = &form.success {
        println!("{success}");
    }
}
