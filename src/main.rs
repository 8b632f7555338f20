use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use eportfolio::api::courses::CourseFilter;
use eportfolio::api::evidence::EvidenceFilter;
use eportfolio::api::learners::LearnerFilter;
use eportfolio::api::notifications::NotificationFilter;
use eportfolio::api::resources::ResourceFilter;
use eportfolio::api::sampling_plans::SamplingPlanFilter;
use eportfolio::api::{ListParams, Mutable, Resource};
use eportfolio::config::{Config, SecureString};
use eportfolio::notify::{Toaster, Variant};
use eportfolio::observability::init_tracing;
use eportfolio::session::{
    EnvTokenProvider, FileStorage, LogNavigator, StaticTokenProvider, TokenProvider,
};
use eportfolio::store::{Collaborators, EntityContainer, Portfolio};

const TOKEN_ENV_VAR: &str = "EPORTFOLIO_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "eportfolio", version, about = "E-portfolio backend client")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `api.base_url`
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token; read from EPORTFOLIO_TOKEN when omitted
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of an entity collection
    List {
        entity: EntityKind,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single record
    Show { entity: EntityKind, id: String },
    /// Delete a record
    Delete { entity: EntityKind, id: String },
    /// List the notification inbox
    Notifications {
        #[arg(long)]
        unread: bool,
    },
    /// Print the config file location
    ConfigPath,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EntityKind {
    Course,
    Evidence,
    Learner,
    Resource,
    SamplingPlan,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Command::ConfigPath = cli.command {
        println!("{}", Config::config_path().display());
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
        config.validate()?;
    }

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(run(cli, config))
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let tokens: Arc<dyn TokenProvider> = match cli.token {
        Some(token) => Arc::new(StaticTokenProvider::new(Some(SecureString::new(token)))),
        None => Arc::new(EnvTokenProvider::new(TOKEN_ENV_VAR)),
    };
    let toaster = Arc::new(Toaster::new(config.notifications.max_visible));
    let collaborators = Collaborators {
        tokens,
        storage: Arc::new(FileStorage::new(config.session.storage_path())),
        navigator: Arc::new(LogNavigator::new()),
        notifier: Arc::clone(&toaster) as _,
    };
    let portfolio = Portfolio::new(&config, collaborators).context("building HTTP client")?;

    let outcome = dispatch(&portfolio, cli.command).await;
    for notice in toaster.history() {
        match notice.variant {
            Variant::Success => eprintln!("✓ {}", notice.message),
            Variant::Error => eprintln!("✗ {}", notice.message),
        }
    }
    outcome
}

async fn dispatch(portfolio: &Portfolio, command: Command) -> Result<()> {
    match command {
        Command::List {
            entity,
            page,
            page_size,
            search,
        } => {
            let page_size = page_size.unwrap_or(portfolio.default_page_size());
            let page = page.unwrap_or(1);
            match entity {
                EntityKind::Course => {
                    let filter = CourseFilter {
                        search,
                        ..Default::default()
                    };
                    list(&portfolio.courses, ListParams::filtered(filter).with_page(page, page_size)).await
                }
                EntityKind::Evidence => {
                    let filter = EvidenceFilter {
                        search,
                        ..Default::default()
                    };
                    list(&portfolio.evidence, ListParams::filtered(filter).with_page(page, page_size)).await
                }
                EntityKind::Learner => {
                    let filter = LearnerFilter {
                        search,
                        ..Default::default()
                    };
                    list(&portfolio.learners, ListParams::filtered(filter).with_page(page, page_size)).await
                }
                EntityKind::Resource => {
                    let filter = ResourceFilter {
                        search,
                        ..Default::default()
                    };
                    list(&portfolio.resources, ListParams::filtered(filter).with_page(page, page_size)).await
                }
                EntityKind::SamplingPlan => {
                    let filter = SamplingPlanFilter {
                        search,
                        ..Default::default()
                    };
                    list(
                        &portfolio.sampling_plans,
                        ListParams::filtered(filter).with_page(page, page_size),
                    )
                    .await
                }
            }
        }
        Command::Show { entity, id } => match entity {
            EntityKind::Course => show(&portfolio.courses, &id).await,
            EntityKind::Evidence => show(&portfolio.evidence, &id).await,
            EntityKind::Learner => show(&portfolio.learners, &id).await,
            EntityKind::Resource => show(&portfolio.resources, &id).await,
            EntityKind::SamplingPlan => show(&portfolio.sampling_plans, &id).await,
        },
        Command::Delete { entity, id } => match entity {
            EntityKind::Course => delete(&portfolio.courses, &id).await,
            EntityKind::Evidence => delete(&portfolio.evidence, &id).await,
            EntityKind::Learner => delete(&portfolio.learners, &id).await,
            EntityKind::Resource => delete(&portfolio.resources, &id).await,
            EntityKind::SamplingPlan => delete(&portfolio.sampling_plans, &id).await,
        },
        Command::Notifications { unread } => {
            let center = &portfolio.notifications;
            let filter = NotificationFilter {
                unread_only: unread,
            };
            if !center.fetch(ListParams::filtered(filter)).await {
                bail!("could not load notifications");
            }
            let state = center.snapshot();
            print_json(&serde_json::json!({
                "unread": center.unread_count(),
                "data": state.items,
            }))
        }
        Command::ConfigPath => {
            println!("{}", Config::config_path().display());
            Ok(())
        }
    }
}

async fn list<R: Resource>(
    container: &EntityContainer<R>,
    params: ListParams<R::Filter>,
) -> Result<()> {
    if !container.fetch(params).await {
        bail!("could not load {} list", R::LABEL.to_lowercase());
    }
    let state = container.snapshot();
    print_json(&serde_json::json!({
        "data": state.items,
        "meta_data": state.pagination,
    }))
}

async fn show<R: Resource>(container: &EntityContainer<R>, id: &str) -> Result<()> {
    match container.find(id).await {
        Some(item) => print_json(&item),
        None => bail!("could not load {} {}", R::LABEL.to_lowercase(), id),
    }
}

async fn delete<R: Mutable>(container: &EntityContainer<R>, id: &str) -> Result<()> {
    if !container.delete(id).await {
        bail!("could not delete {} {}", R::LABEL.to_lowercase(), id);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering output")?;
    println!("{rendered}");
    Ok(())
}
