use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use teloxide::Bot;
use tokio::task::JoinHandle;

use crate::{
    config::AppConfig,
    domain::PollCursor,
    infrastructure::{
        notifier::TelegramNotifier,
        shutdown::{Shutdown, ShutdownListener},
    },
    practicum::PracticumClient,
    tasks::poller::HomeworkPoller,
};

pub struct HomeworkBotApp {
    poller_handle: JoinHandle<()>,
    shutdown: Shutdown,
    shutdown_listener: ShutdownListener,
}

impl HomeworkBotApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("homework-status-bot/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let source = Arc::new(PracticumClient::new(
            http_client,
            &config.poller,
            config.credentials.practicum_token.clone(),
        ));
        let bot = Bot::new(&config.credentials.telegram_token);
        let notifier = Arc::new(TelegramNotifier::new(bot, &config.credentials));

        let poller = HomeworkPoller::new(
            source,
            notifier,
            config.poller.retry_period,
            PollCursor::now(),
        );
        let poller_handle = poller.spawn(shutdown.subscribe());

        Ok(Self {
            poller_handle,
            shutdown_listener: shutdown.subscribe(),
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let HomeworkBotApp {
            mut poller_handle,
            shutdown,
            mut shutdown_listener,
        } = self;

        tracing::info!("homework status bot started");

        tokio::select! {
            _ = shutdown_listener.notified() => {
                tracing::info!("stop signal received (CTRL+C / SIGTERM)");
            }
            res = &mut poller_handle => {
                if let Err(err) = res {
                    if err.is_panic() {
                        tracing::error!(target: "poller", "homework poller panicked");
                    }
                }
                shutdown.trigger();
                anyhow::bail!("homework poller exited unexpectedly");
            }
        }

        shutdown.trigger();
        if let Err(err) = poller_handle.await {
            if err.is_panic() {
                tracing::error!(target: "poller", "homework poller panicked during shutdown");
            }
        }

        tracing::info!("homework status bot stopped");
        Ok(())
    }
}
