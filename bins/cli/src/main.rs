//! Filmbudget command-line client
//!
//! Usage:
//! - `filmbudget login <email> <password>` - Sign in and persist the token pair
//! - `filmbudget logout` - Forget the stored session
//! - `filmbudget whoami` - Show the signed-in user
//! - `filmbudget projects` - List projects
//! - `filmbudget budget <project> [--finance]` - Print the budget grid
//! - `filmbudget set <project> <row> <column> <value>` - Edit one grid cell
//! - `filmbudget limits <project>` - Preview the limits "save limit" would store
//! - `filmbudget save-limit <project>` - Store planned totals as limits
//! - `filmbudget template <project>` - Load the category template into an empty budget
//! - `filmbudget export <project> <file>` - Download the spreadsheet export
//! - `filmbudget schemes` - List tax schemes
//! - `filmbudget reports <project>` - List production reports

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use filmbudget_client::pages::{BudgetPage, ProductionPage, ProjectsPage, TaxSchemesPage};
use filmbudget_client::{ApiClient, ClientResult, FileTokenStore, Session};
use filmbudget_core::grid::{CellEdit, ColumnKey};
use filmbudget_shared::AppConfig;
use filmbudget_shared::types::{ProjectId, format_amount};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

enum Command {
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Projects,
    Budget { project: ProjectId, finance: bool },
    Set { project: ProjectId, edit: CellEdit },
    Limits { project: ProjectId },
    SaveLimit { project: ProjectId },
    Template { project: ProjectId },
    Export { project: ProjectId, file: PathBuf },
    Schemes,
    Reports { project: ProjectId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filmbudget=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut command = parse(std::env::args().skip(1))?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    if let Command::Budget { finance, .. } = &mut command {
        *finance |= config.grid.show_finance;
    }
    let session = Session::init(FileTokenStore::new(&config.session.token_file))
        .context("Failed to restore session")?;
    let client = Arc::new(ApiClient::new(&config, Arc::new(session))?);
    info!(base_url = %client.base_url(), "Client ready");

    if let Err(e) = run(command, client).await {
        eprintln!("{}", e.notice());
        std::process::exit(1);
    }
    Ok(())
}

fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut args = args.into_iter();
    let Some(name) = args.next() else {
        bail!("No command given; try `filmbudget projects`");
    };
    let rest: Vec<String> = args.collect();

    let command = match (name.as_str(), rest.as_slice()) {
        ("login", [email, password]) => Command::Login {
            email: email.clone(),
            password: password.clone(),
        },
        ("logout", []) => Command::Logout,
        ("whoami", []) => Command::WhoAmI,
        ("projects", []) => Command::Projects,
        ("budget", [project]) => Command::Budget {
            project: project_id(project)?,
            finance: false,
        },
        ("budget", [project, flag]) if flag == "--finance" => Command::Budget {
            project: project_id(project)?,
            finance: true,
        },
        ("set", [project, row, column, value]) => Command::Set {
            project: project_id(project)?,
            edit: CellEdit::new(
                Uuid::parse_str(row).context("Row must be a UUID")?,
                column_key(column)?,
                value.clone(),
            ),
        },
        ("limits", [project]) => Command::Limits {
            project: project_id(project)?,
        },
        ("save-limit", [project]) => Command::SaveLimit {
            project: project_id(project)?,
        },
        ("template", [project]) => Command::Template {
            project: project_id(project)?,
        },
        ("export", [project, file]) => Command::Export {
            project: project_id(project)?,
            file: PathBuf::from(file),
        },
        ("schemes", []) => Command::Schemes,
        ("reports", [project]) => Command::Reports {
            project: project_id(project)?,
        },
        _ => bail!("Unknown command or wrong arguments: {name} {}", rest.join(" ")),
    };
    Ok(command)
}

fn project_id(text: &str) -> anyhow::Result<ProjectId> {
    text.parse().context("Project must be a UUID")
}

fn column_key(text: &str) -> anyhow::Result<ColumnKey> {
    serde_json::from_value(serde_json::Value::String(text.to_string()))
        .with_context(|| format!("Unknown column: {text}"))
}

async fn run(command: Command, client: Arc<ApiClient>) -> ClientResult<()> {
    match command {
        Command::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            println!("Вход выполнен: {} <{}>", user.full_name, user.email);
        }
        Command::Logout => {
            client.logout()?;
            println!("Сессия завершена");
        }
        Command::WhoAmI => {
            let user = client.me().await?;
            println!("{} <{}>", user.full_name, user.email);
        }
        Command::Projects => {
            let page = ProjectsPage::open(client).await?;
            for project in page.projects() {
                println!("{}  {}  {:?}", project.id, project.name, project.status);
            }
        }
        Command::Budget { project, finance } => {
            let page = BudgetPage::open(client, project, finance).await?;
            print_budget(&page);
            println!("Итого: {}", format_amount(page.total()));
        }
        Command::Set { project, edit } => {
            let mut page = BudgetPage::open(client, project, false).await?;
            let line = page.apply_edit(&edit).await?;
            println!("Строка {line} обновлена");
            println!("Итого: {}", format_amount(page.total()));
        }
        Command::Limits { project } => {
            let page = BudgetPage::open(client, project, true).await?;
            for entry in page.limit_preview()?.entries.iter().filter(|e| e.changes()) {
                let current = entry.current.map(format_amount).unwrap_or_default();
                println!("{}: {current} -> {}", entry.name, format_amount(entry.proposed));
            }
        }
        Command::SaveLimit { project } => {
            let mut page = BudgetPage::open(client, project, true).await?;
            page.save_limits().await?;
            println!("Лимиты сохранены");
        }
        Command::Template { project } => {
            let mut page = BudgetPage::open(client, project, false).await?;
            page.load_template().await?;
            println!("Шаблон загружен: {} строк", page.rows().len());
        }
        Command::Export { project, file } => {
            let page = BudgetPage::open(client, project, false).await?;
            let size = page.export(&file).await?;
            println!("{}: {size} байт", file.display());
        }
        Command::Schemes => {
            let page = TaxSchemesPage::open(client).await?;
            for scheme in page.schemes() {
                let marker = if scheme.is_system { " (системная)" } else { "" };
                println!("{}  {}{marker}", scheme.id, scheme.name);
            }
        }
        Command::Reports { project } => {
            let page = ProductionPage::open(client, project).await?;
            for report in page.reports_with_entries().await? {
                println!(
                    "День {}  {}  {:?}  записей: {}  итого: {}",
                    report.shoot_day_number,
                    report.date,
                    report.status,
                    report.entry_count,
                    format_amount(report.total_gross)
                );
            }
        }
    }
    Ok(())
}

fn print_budget(page: &BudgetPage) {
    let columns = page.columns();
    let header: Vec<&str> = columns.iter().map(|c| c.title).collect();
    println!("{}", header.join(" | "));

    for row in page.rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let text = column.key.display(row);
                if column.key == ColumnKey::Name {
                    format!("{}{text}", "  ".repeat(row.level))
                } else {
                    text
                }
            })
            .collect();
        println!("{}  [{}]", cells.join(" | "), row.id);
        if let Some(error) = &row.error {
            println!("    ! {error}");
        }
    }
}
