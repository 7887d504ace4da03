use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    seed::seed_demo_data,
    underwriting::{underwriting_queue_worker, QueueScheduler},
};
use financehub_core::{
    accounts::{AccountRepository, AccountService, AccountServiceTrait},
    assets::{AssetRepository, AssetService, AssetServiceTrait, PriceSimulator},
    dashboard::{DashboardService, DashboardServiceTrait},
    investments::{
        InvestmentRepository, InvestmentService, InvestmentServiceTrait, PriceUpdateService,
        PriceUpdateServiceTrait,
    },
    ledger::LedgerStore,
    loans::{
        DtiEvaluator, LoanApplicationRepository, LoanRepository, LoanService, LoanServiceTrait,
        UnderwritingService, UnderwritingServiceTrait,
    },
    notifications::{NotificationRepository, NotificationService, NotificationServiceTrait},
    settings::LedgerSettings,
    transactions::{TransactionRepository, TransactionService, TransactionServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};

pub struct AppState {
    /// Shared in-memory ledger behind every repository.
    pub store: Arc<LedgerStore>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub investment_service: Arc<dyn InvestmentServiceTrait>,
    pub price_update_service: Arc<dyn PriceUpdateServiceTrait>,
    pub loan_service: Arc<dyn LoanServiceTrait>,
    pub underwriting_service: Arc<dyn UnderwritingServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
}

impl AppState {
    /// Maps the demo username alias onto a user id.
    pub fn resolve_user_id(&self, identifier: &str) -> String {
        self.user_service.resolve_user_id(identifier)
    }
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wires repositories and services over a fresh ledger, starts the
/// underwriting worker and seeds demo data when enabled.
///
/// Must run inside a tokio runtime.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = Arc::new(LedgerStore::new());
    let settings = LedgerSettings {
        large_transaction_threshold: config.large_transaction_threshold,
        ..LedgerSettings::default()
    };

    let user_repository = Arc::new(UserRepository::new(store.clone()));
    let account_repository = Arc::new(AccountRepository::new(store.clone()));
    let asset_repository = Arc::new(AssetRepository::new(store.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(store.clone()));
    let investment_repository = Arc::new(InvestmentRepository::new(store.clone()));
    let loan_repository = Arc::new(LoanRepository::new(store.clone()));
    let application_repository = Arc::new(LoanApplicationRepository::new(store.clone()));
    let notification_repository = Arc::new(NotificationRepository::new(store.clone()));

    let notification_service: Arc<dyn NotificationServiceTrait> =
        Arc::new(NotificationService::new(notification_repository));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));
    let account_service: Arc<dyn AccountServiceTrait> = Arc::new(AccountService::new(
        account_repository.clone(),
        notification_service.clone(),
    ));
    let asset_service: Arc<dyn AssetServiceTrait> =
        Arc::new(AssetService::new(asset_repository.clone()));
    let transaction_service: Arc<dyn TransactionServiceTrait> =
        Arc::new(TransactionService::new(
            store.clone(),
            transaction_repository,
            account_repository.clone(),
            notification_service.clone(),
            settings,
        ));
    let investment_service: Arc<dyn InvestmentServiceTrait> = Arc::new(InvestmentService::new(
        store.clone(),
        investment_repository.clone(),
        transaction_service.clone(),
        notification_service.clone(),
    ));
    let price_update_service: Arc<dyn PriceUpdateServiceTrait> =
        Arc::new(PriceUpdateService::new(
            store.clone(),
            asset_repository,
            investment_repository,
            PriceSimulator::from_entropy(),
        ));
    let loan_service: Arc<dyn LoanServiceTrait> = Arc::new(LoanService::new(
        store.clone(),
        loan_repository,
        account_repository.clone(),
        transaction_service.clone(),
        notification_service.clone(),
    ));

    // Evaluation jobs flow through a queue so the worker can be started
    // once the underwriting service exists.
    let (tx, rx) = mpsc::unbounded_channel();
    let underwriting_service: Arc<dyn UnderwritingServiceTrait> =
        Arc::new(UnderwritingService::new(
            application_repository,
            loan_service.clone(),
            DtiEvaluator::new(account_repository, transaction_service.clone()),
            notification_service.clone(),
            Arc::new(QueueScheduler::new(tx)),
            config.loan_evaluation_delay.as_secs(),
        ));
    tokio::spawn(underwriting_queue_worker(
        rx,
        underwriting_service.clone(),
        config.loan_evaluation_delay,
    ));

    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        account_service.clone(),
        investment_service.clone(),
        loan_service.clone(),
        transaction_service.clone(),
    ));

    let state = Arc::new(AppState {
        store,
        user_service,
        account_service,
        asset_service,
        transaction_service,
        investment_service,
        price_update_service,
        loan_service,
        underwriting_service,
        notification_service,
        dashboard_service,
    });

    if config.seed_demo_data {
        seed_demo_data(&state).await?;
    }

    Ok(state)
}
