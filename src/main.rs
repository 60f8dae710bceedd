//! CLI leadcast
//!
//! Запускает один раунд публикации: подписывает обработчики, публикует лид и
//! печатает журнал принятых сообщений в JSON.

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leadcast::{
    init_logging, AppError, Broker, ErrorExt, HandleMessage, IncomingLeadHandler, InvalidArgument,
    Lead, MemorySink, PubSubError, Settings,
};
use leadcast_error::{LogLevel, StatusCode};
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "leadcast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "One-shot publish/subscribe broker for incoming leads", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Файл настроек (TOML/JSON/YAML)
    #[arg(short, long, env = "LEADCAST_CONFIG")]
    config: Option<PathBuf>,
    /// Подробный вывод (debug)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Только warn/error
    #[arg(short, long)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Подписать обработчики и опубликовать один лид
    #[command(alias = "p")]
    Publish {
        /// Канал публикации (по умолчанию канал из настроек)
        #[arg(long)]
        channel: Option<String>,
        /// Имя подписчика; можно указать несколько раз
        #[arg(short, long = "subscriber")]
        subscribers: Vec<String>,
        /// Отписать подписчика перед публикацией
        #[arg(short, long = "unsubscribe")]
        unsubscribe: Vec<String>,
        /// Лид в JSON, например '{"firstName":"Test"}'; `null` означает пустое сообщение
        #[arg(short, long)]
        lead: String,
    },
    /// Провести лид через обработчик по умолчанию в каждом канале и вывести
    /// записанные имена каналов
    Channels {
        /// Лид в JSON
        #[arg(short, long)]
        lead: String,
        /// Каналы
        #[arg(required = true)]
        channels: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(run(cli))
}

/// Загружает настройки, поднимает логирование и выполняет команду.
///
/// Ошибка команды попадает в лог до `shutdown()`, пока файловый writer жив.
fn run(cli: Cli) -> u8 {
    let mut settings = match Settings::load_from(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => return fail(&anyhow::Error::from(AppError::from(err))),
    };
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    } else if cli.quiet {
        settings.logging.level = "warn".to_string();
    }

    let logging = match init_logging(&settings.logging) {
        Ok(handle) => handle,
        Err(err) => return fail(&anyhow::Error::from(AppError::from(err))),
    };

    let result = match cli.command {
        Commands::Publish {
            channel,
            subscribers,
            unsubscribe,
            lead,
        } => publish(&settings, channel, subscribers, unsubscribe, &lead),
        Commands::Channels { lead, channels } => record_channels(&lead, &channels),
    };
    let code = match result {
        Ok(()) => 0,
        Err(err) => fail(&err),
    };

    logging.shutdown();
    code
}

fn publish(
    settings: &Settings,
    channel: Option<String>,
    subscribers: Vec<String>,
    unsubscribe: Vec<String>,
    lead: &str,
) -> Result<()> {
    let lead = Lead::from_json(lead).map_err(AppError::from)?;
    let sink = Arc::new(MemorySink::new());
    let broker = Broker::from_settings(&settings.broker, sink.clone());

    let subscribers = if subscribers.is_empty() {
        vec![settings.broker.default_subscriber.clone()]
    } else {
        subscribers
    };
    for name in &subscribers {
        broker
            .subscribe(Arc::new(IncomingLeadHandler::new(Some(name))))
            .map_err(AppError::from)?;
    }
    for name in &unsubscribe {
        broker
            .unsubscribe(&IncomingLeadHandler::new(Some(name)))
            .map_err(AppError::from)?;
    }

    let channel = channel.unwrap_or_else(|| broker.channel().to_string());
    broker
        .publish(&channel, lead.as_ref())
        .map_err(AppError::from)?;

    let remaining: Vec<String> = broker.subscribers().iter().map(|s| s.to_string()).collect();
    let out = json!({
        "channel": channel,
        "processed": sink.snapshot(),
        "remaining_subscribers": remaining,
        "stats": broker.stats(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("failed to render result")?
    );
    Ok(())
}

fn record_channels(
    lead: &str,
    channels: &[String],
) -> Result<()> {
    let Some(lead) = Lead::from_json(lead).map_err(AppError::from)? else {
        let err = PubSubError::from(InvalidArgument::MissingMessage);
        return Err(AppError::from(err).into());
    };

    let handler = IncomingLeadHandler::default();
    for channel in channels {
        handler
            .handle_message(channel, &lead)
            .map_err(AppError::from)?;
    }

    let names: Vec<String> = handler
        .subscribed_channels()
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&names).context("failed to render channels")?
    );
    Ok(())
}

/// Ошибка для stderr; код сериализуется числом.
#[derive(Serialize)]
struct ErrorReport {
    code: StatusCode,
    message: String,
}

/// Логирует ошибку команды и возвращает код завершения.
fn fail(err: &anyhow::Error) -> u8 {
    let Some(app) = err.downcast_ref::<AppError>() else {
        tracing::error!(error = %err, "Command failed");
        eprintln!("error: {err:#}");
        return 1;
    };

    report(app);
    app.status_code().exit_code() as u8
}

fn report(err: &AppError) {
    let code = err.status_code();
    let tags = err
        .metrics_tags()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",");

    match code.log_level() {
        LogLevel::Error => {
            tracing::error!(code = code.code(), %tags, error = %err.log_message(), "Command failed")
        }
        LogLevel::Warn => tracing::warn!(code = code.code(), %tags, error = %err, "Command failed"),
        _ => tracing::info!(code = code.code(), %tags, error = %err, "Command rejected"),
    }

    let report = ErrorReport {
        code,
        message: err.client_message(),
    };
    match serde_json::to_string(&report) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!("error [{code}]: {}", report.message),
    }
}
