use crate::opt::Commands;
use anyhow::Result;
use axum::serve;
use clap::Parser;
use delfos_core::bank::QuestionBank;
use delfos_core::store::SessionStore;
use delfos_core::winner::WinnerLedger;
use delfos_utils::net::create_listener;
use delfos_utils::tracing::TracingConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

mod app;
mod opt;
mod routes;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub(crate) struct InnerAppConfig {
    bank: QuestionBank,
}

#[derive(Clone, Debug)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    pub(crate) fn new(bank: QuestionBank) -> Self {
        Self(Arc::new(InnerAppConfig { bank }))
    }

    pub(crate) fn bank(&self) -> &QuestionBank {
        &self.0.bank
    }
}

async fn run(opt: opt::Run) -> Result<()> {
    delfos_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .env(opt.env.clone())
            .build(),
    )?;

    let bank_config = delfos_config::bank::load(&opt.bank).await?;
    let bank = QuestionBank::from(bank_config);
    tracing::info!(
        questions = bank.question_count(),
        profiles = ?bank.profile_names(),
        "question bank loaded"
    );

    let store = SessionStore::open(&opt.data_dir).await?;
    let ledger = WinnerLedger::new(&opt.data_dir);

    let opt::Run {
        host, port, origins, ..
    } = opt;

    let app = app::create_app(AppConfig::new(bank), store, ledger, origins)?;
    let listener = create_listener(host, port, (DEFAULT_HOST, DEFAULT_PORT)).await?;

    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve(listener, app.into_make_service()).await?;
    Ok(())
}

fn main() -> Result<()> {
    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
