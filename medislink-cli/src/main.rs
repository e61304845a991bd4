use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use medislink_client::{ClientConfig, MedisClient};
use medislink_core::{AdForm, AdminAction, AdminTab, Followup, LoanStatus};
use tracing_subscriber::{EnvFilter, fmt};

mod print;
mod session;
mod token;

use session::{DonationInput, LoanInput, Session, ToolInput, map_client_error};

#[derive(Debug, Parser)]
#[command(name = "medislink", version, about = "CLI клиент платформы MedisLink")]
struct Cli {
    /// Адрес API (по умолчанию `MEDISLINK_API_URL` или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Не спрашивать подтверждение перед действиями администратора.
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список инструментов.
    Tools,
    /// Страница инструмента.
    Tool {
        #[arg(long)]
        id: i64,
    },
    /// Страница новости.
    News {
        #[arg(long)]
        id: i64,
    },
    /// Пожертвование инструмента (требует токен).
    Donate {
        #[arg(long)]
        tool_name: String,
        /// Категория; по умолчанию первая из списка.
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "1")]
        quantity: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        pickup_address: String,
        /// Дата забора `YYYY-MM-DD`.
        #[arg(long)]
        pickup_date: String,
        /// Фото инструмента, не больше 2 МБ.
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Заявка на аренду (требует подтверждённый профиль).
    ///
    /// Если `--return-due` не указан, возврат в день начала.
    Loan {
        #[arg(long)]
        tool_id: i64,
        /// Дата начала `YYYY-MM-DD`.
        #[arg(long)]
        loan_date: String,
        #[arg(long)]
        return_due: Option<String>,
        #[arg(long)]
        medical_condition: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Выход: удаляет сохранённый токен после подтверждения.
    Logout,
    /// Админ-панель.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// Все коллекции и выбранная вкладка.
    Dashboard {
        /// loans | inventory | news | ads | donations
        #[arg(long, default_value = "inventory")]
        tab: String,
    },
    /// Удаление инструмента.
    DeleteTool {
        #[arg(long)]
        id: i64,
    },
    /// Удаление баннера.
    DeleteAd {
        #[arg(long)]
        id: i64,
    },
    /// Пожертвование получено.
    ReceiveDonation {
        #[arg(long)]
        id: i64,
    },
    /// Смена статуса заявки.
    LoanStatus {
        #[arg(long)]
        id: i64,
        /// approved | rejected | active | completed
        #[arg(long)]
        status: String,
    },
    /// Принять пожертвование в инвентарь.
    ApproveDonation {
        #[arg(long)]
        id: i64,
        #[arg(long, default_value = "baik")]
        condition: String,
    },
    /// Публикация новости.
    CreateNews {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Баннер для слайдера.
    CreateAd {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image_url: String,
        #[arg(long, default_value = "")]
        link: String,
    },
    /// Новый инструмент в инвентаре.
    CreateTool {
        #[arg(long)]
        name: String,
        /// Категория; по умолчанию первая из списка.
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        dimensions: String,
        #[arg(long, default_value = "")]
        weight_cap: String,
        #[arg(long, default_value = "baik")]
        condition: String,
        #[arg(long, default_value = "1")]
        stock: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Kesalahan: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&log_level())?;

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(server) = cli.server.as_deref() {
        config = config.with_base_url(server);
    }
    let mut client = MedisClient::new(&config).map_err(map_client_error)?;
    if let Some(token) = token::load_token().context("gagal membaca .medislink_token")? {
        client.set_token(token);
    }

    let mut session = Session::new(client, cli.yes);

    match cli.command {
        Command::Tools => session.list_tools().await?,
        Command::Tool { id } => session.show_tool(id).await?,
        Command::News { id } => session.show_news(id).await?,
        Command::Donate {
            tool_name,
            category,
            quantity,
            description,
            pickup_address,
            pickup_date,
            photo,
        } => {
            session
                .donate(DonationInput {
                    tool_name,
                    category,
                    quantity,
                    description,
                    pickup_address,
                    pickup_date,
                    photo,
                })
                .await?
        }
        Command::Loan {
            tool_id,
            loan_date,
            return_due,
            medical_condition,
            notes,
        } => {
            session
                .loan(LoanInput {
                    tool_id,
                    loan_date,
                    return_due,
                    medical_condition,
                    notes,
                })
                .await?
        }
        Command::Logout => {
            let followup = session
                .run_action(AdminAction::Logout, AdminTab::default())
                .await?;
            if followup == Some(Followup::SignOut) {
                token::remove_token().context("gagal menghapus token")?;
                println!("Anda telah keluar.");
            }
        }
        Command::Admin(command) => run_admin(&mut session, command).await?,
    }

    Ok(())
}

async fn run_admin(session: &mut Session, command: AdminCommand) -> Result<()> {
    let (action, tab) = match command {
        AdminCommand::Dashboard { tab } => {
            let tab = tab.parse::<AdminTab>().map_err(|err| anyhow!(err))?;
            return session.dashboard(tab).await;
        }
        AdminCommand::CreateNews {
            title,
            content,
            image,
        } => return session.create_news(title, content, image.as_deref()).await,
        AdminCommand::CreateAd {
            title,
            description,
            image_url,
            link,
        } => {
            return session
                .create_ad(AdForm {
                    title,
                    description,
                    image_url,
                    link,
                })
                .await;
        }
        AdminCommand::CreateTool {
            name,
            category,
            kind,
            size,
            description,
            dimensions,
            weight_cap,
            condition,
            stock,
            image,
        } => {
            return session
                .create_tool(ToolInput {
                    name,
                    category,
                    kind,
                    size,
                    description,
                    dimensions,
                    weight_cap,
                    condition,
                    stock,
                    image,
                })
                .await;
        }
        AdminCommand::DeleteTool { id } => (AdminAction::DeleteTool(id), AdminTab::Inventory),
        AdminCommand::DeleteAd { id } => (AdminAction::DeleteAd(id), AdminTab::Ads),
        AdminCommand::ReceiveDonation { id } => {
            (AdminAction::ReceiveDonation(id), AdminTab::Donations)
        }
        AdminCommand::LoanStatus { id, status } => {
            let status = status.parse::<LoanStatus>().map_err(|err| anyhow!(err))?;
            (AdminAction::UpdateLoanStatus { id, status }, AdminTab::Loans)
        }
        AdminCommand::ApproveDonation { id, condition } => (
            AdminAction::ApproveDonation { id, condition },
            AdminTab::Donations,
        ),
    };

    session.run_action(action, tab).await?;
    Ok(())
}

fn log_level() -> String {
    std::env::var("LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn loan_return_due_is_optional() {
        let cli = Cli::try_parse_from([
            "medislink",
            "loan",
            "--tool-id",
            "3",
            "--loan-date",
            "2026-10-20",
            "--medical-condition",
            "Patah kaki",
        ])
        .expect("parses");

        match cli.command {
            Command::Loan {
                tool_id,
                return_due,
                ..
            } => {
                assert_eq!(tool_id, 3);
                assert!(return_due.is_none());
            }
            other => panic!("expected loan command, got {other:?}"),
        }
    }

    #[test]
    fn yes_flag_is_global() {
        let cli = Cli::try_parse_from(["medislink", "admin", "delete-tool", "--id", "7", "--yes"])
            .expect("parses");
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Command::Admin(AdminCommand::DeleteTool { id: 7 })
        ));
    }

    #[test]
    fn tool_type_flag_maps_to_kind() {
        let cli = Cli::try_parse_from([
            "medislink",
            "admin",
            "create-tool",
            "--name",
            "Kursi Roda",
            "--type",
            "Manual",
        ])
        .expect("parses");

        match cli.command {
            Command::Admin(AdminCommand::CreateTool { kind, stock, category, .. }) => {
                assert_eq!(kind, "Manual");
                assert_eq!(category, None);
                assert_eq!(stock, "1");
            }
            other => panic!("expected create-tool, got {other:?}"),
        }
    }
}
