//! Demo data loaded at startup: the asset catalog and a demo user with
//! accounts, a mortgage, starter positions and three months of history.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use financehub_core::{
    accounts::{AccountType, NewAccount},
    assets::NewAvailableAsset,
    constants::DEMO_USERNAME,
    investments::TradeRequest,
    loans::{LoanType, NewLoan},
    transactions::{Transaction, TransactionRepository, TransactionRepositoryTrait},
    users::NewUser,
    utils::{new_id, now_naive, round_currency},
};
use rand::{seq::SliceRandom, Rng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use crate::main_lib::AppState;

struct CatalogEntry {
    symbol: &'static str,
    name: &'static str,
    asset_type: &'static str,
    market: &'static str,
    base_price: Decimal,
}

const BORSA: &str = "Borsa Italiana";

fn catalog() -> Vec<CatalogEntry> {
    let stock = |symbol, name, base_price| CatalogEntry {
        symbol,
        name,
        asset_type: "Azione",
        market: BORSA,
        base_price,
    };
    vec![
        stock("ENI", "Eni S.p.A.", dec!(13.45)),
        stock("ENEL", "Enel S.p.A.", dec!(6.20)),
        stock("UCG", "UniCredit S.p.A.", dec!(28.90)),
        stock("ISP", "Intesa Sanpaolo S.p.A.", dec!(3.15)),
        stock("TIT", "Telecom Italia S.p.A.", dec!(0.24)),
        stock("RACE", "Ferrari N.V.", dec!(385.00)),
        stock("G", "Generali Assicurazioni S.p.A.", dec!(23.50)),
        CatalogEntry {
            symbol: "FTSE-MIB",
            name: "FTSE MIB ETF",
            asset_type: "ETF",
            market: BORSA,
            base_price: dec!(26.80),
        },
        CatalogEntry {
            symbol: "BTP-10Y",
            name: "BTP Italia 10 anni",
            asset_type: "Obbligazione",
            market: "MTS",
            base_price: dec!(98.50),
        },
        CatalogEntry {
            symbol: "CCT-5Y",
            name: "CCT 5 anni",
            asset_type: "Obbligazione",
            market: "MTS",
            base_price: dec!(101.20),
        },
    ]
}

/// Base price moved by up to ±10%.
fn opening_price(base: Decimal, rng: &mut impl Rng) -> Decimal {
    let basis_points = rng.gen_range(-1_000i64..=1_000);
    let price = round_currency(base * (Decimal::ONE + Decimal::new(basis_points, 4)));
    price.max(dec!(0.01))
}

struct HistoryCategory {
    name: &'static str,
    min_cents: i64,
    max_cents: i64,
    direction: Direction,
    descriptions: &'static [&'static str],
}

#[derive(Clone, Copy)]
enum Direction {
    Expense,
    Income,
    Either,
}

const HISTORY: &[HistoryCategory] = &[
    HistoryCategory {
        name: "Alimentari",
        min_cents: 2_000,
        max_cents: 15_000,
        direction: Direction::Expense,
        descriptions: &["Supermercato Esselunga", "COOP", "Carrefour", "Lidl", "Mercato Locale"],
    },
    HistoryCategory {
        name: "Carburante",
        min_cents: 4_000,
        max_cents: 8_000,
        direction: Direction::Expense,
        descriptions: &["Eni Station", "IP", "Q8", "Agip", "Shell"],
    },
    HistoryCategory {
        name: "Ristoranti",
        min_cents: 2_500,
        max_cents: 12_000,
        direction: Direction::Expense,
        descriptions: &["Pizzeria Da Mario", "Trattoria del Centro", "Sushi Bar", "Osteria"],
    },
    HistoryCategory {
        name: "Utilities",
        min_cents: 8_000,
        max_cents: 20_000,
        direction: Direction::Expense,
        descriptions: &["Enel Energia", "Gas Naturale", "Acquedotto", "TIM", "Vodafone"],
    },
    HistoryCategory {
        name: "Shopping",
        min_cents: 3_000,
        max_cents: 30_000,
        direction: Direction::Expense,
        descriptions: &["Amazon", "Zara", "MediaWorld", "Ikea", "Farmacia"],
    },
    HistoryCategory {
        name: "Stipendio",
        min_cents: 250_000,
        max_cents: 350_000,
        direction: Direction::Income,
        descriptions: &["Accredito Stipendio", "Bonifico Azienda", "Pagamento Mensile"],
    },
    HistoryCategory {
        name: "Bonus",
        min_cents: 50_000,
        max_cents: 150_000,
        direction: Direction::Income,
        descriptions: &["Bonus Produttività", "Premio Risultati", "Rimborso Spese"],
    },
    HistoryCategory {
        name: "Investimenti",
        min_cents: 10_000,
        max_cents: 200_000,
        direction: Direction::Either,
        descriptions: &["Acquisto Azioni", "Vendita Titoli", "Dividendi", "Commissioni Trading"],
    },
];

const HISTORY_DAYS: i64 = 90;
const HISTORY_SIZE: usize = 100;

/// Random past transactions spread over the given accounts. They are
/// recorded as history only and do not move balances.
fn transaction_history(account_ids: &[String], now: NaiveDateTime) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    let start = now - Duration::days(HISTORY_DAYS);
    let mut history = Vec::with_capacity(HISTORY_SIZE);

    for _ in 0..HISTORY_SIZE {
        let (Some(category), Some(account_id)) =
            (HISTORY.choose(&mut rng), account_ids.choose(&mut rng))
        else {
            break;
        };
        let date = start
            + Duration::days(rng.gen_range(0..=HISTORY_DAYS))
            + Duration::hours(rng.gen_range(8..=20))
            + Duration::minutes(rng.gen_range(0..=59));
        let magnitude = Decimal::new(rng.gen_range(category.min_cents..=category.max_cents), 2);
        let amount = match category.direction {
            Direction::Expense => -magnitude,
            Direction::Income => magnitude,
            Direction::Either if rng.gen_bool(0.5) => -magnitude,
            Direction::Either => magnitude,
        };
        let description = category
            .descriptions
            .choose(&mut rng)
            .copied()
            .unwrap_or(category.name);

        history.push(Transaction {
            id: new_id(),
            account_id: account_id.clone(),
            amount,
            description: description.to_string(),
            category: category.name.to_string(),
            transaction_date: date,
            created_at: date,
            reference_number: Some(format!(
                "TXN-{}-{}",
                date.format("%Y%m%d%H%M%S"),
                rng.gen_range(1000..=9999)
            )),
        });
    }
    history
}

async fn seed_assets(state: &Arc<AppState>) -> anyhow::Result<usize> {
    let prices: Vec<(CatalogEntry, Decimal)> = {
        let mut rng = rand::thread_rng();
        catalog()
            .into_iter()
            .map(|entry| {
                let price = opening_price(entry.base_price, &mut rng);
                (entry, price)
            })
            .collect()
    };

    for (entry, current_price) in &prices {
        state
            .asset_service
            .create_asset(NewAvailableAsset {
                symbol: entry.symbol.to_string(),
                name: entry.name.to_string(),
                current_price: *current_price,
                asset_type: entry.asset_type.to_string(),
                market: entry.market.to_string(),
                currency: "EUR".to_string(),
            })
            .await?;
    }
    Ok(prices.len())
}

async fn seed_demo_user(state: &Arc<AppState>) -> anyhow::Result<String> {
    let user = match state.user_service.get_user_by_username(DEMO_USERNAME)? {
        Some(existing) => existing,
        None => {
            state
                .user_service
                .create_user(NewUser {
                    username: DEMO_USERNAME.to_string(),
                    password: "demo-password".to_string(),
                    name: "Mario Rossi".to_string(),
                    email: "mario.rossi@example.it".to_string(),
                })
                .await?
        }
    };

    let mut account_ids = Vec::new();
    let mut investment_account_id = None;
    for (name, account_type, balance) in [
        ("Conto Corrente Principale", AccountType::Checking, dec!(18070.95)),
        ("Conto Risparmio", AccountType::Savings, dec!(45620.30)),
        ("Conto Investimenti", AccountType::Investment, dec!(67384.80)),
    ] {
        let account = state
            .account_service
            .create_account(NewAccount {
                user_id: user.id.clone(),
                name: name.to_string(),
                account_type,
                initial_balance: balance,
            })
            .await?;
        if account_type == AccountType::Investment {
            investment_account_id = Some(account.id.clone());
        }
        account_ids.push(account.id);
    }

    state
        .loan_service
        .create_loan(NewLoan {
            user_id: user.id.clone(),
            loan_type: LoanType::Mortgage,
            amount: dec!(350000.00),
            interest_rate: dec!(3.25),
            term_months: 360,
        })
        .await?;

    if let Some(account_id) = investment_account_id {
        for (symbol, shares) in [
            ("ENI", dec!(150)),
            ("ENEL", dec!(500)),
            ("UCG", dec!(80)),
            ("RACE", dec!(5)),
            ("FTSE-MIB", dec!(200)),
        ] {
            let request = TradeRequest {
                account_id: account_id.clone(),
                symbol: symbol.to_string(),
                shares,
            };
            if let Err(e) = state.investment_service.buy(&user.id, request).await {
                warn!("Could not seed position in {}: {}", symbol, e);
            }
        }
    }

    let history = transaction_history(&account_ids, now_naive());
    let recorded = history.len();
    let repository = TransactionRepository::new(state.store.clone());
    state.store.execute(|ledger| {
        for transaction in history {
            repository.create_in_transaction(ledger, transaction)?;
        }
        Ok(())
    })?;
    info!("Seeded {} history transactions for {}", recorded, DEMO_USERNAME);

    Ok(user.id)
}

/// Loads the asset catalog and the demo user.
pub async fn seed_demo_data(state: &Arc<AppState>) -> anyhow::Result<()> {
    let assets = seed_assets(state).await?;
    let user_id = seed_demo_user(state).await?;
    info!("Demo data seeded: {} assets, demo user {}", assets, user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_price_stays_within_ten_percent() {
        let mut rng = rand::thread_rng();
        for entry in catalog() {
            for _ in 0..50 {
                let price = opening_price(entry.base_price, &mut rng);
                assert!(price >= dec!(0.01));
                assert!(price <= round_currency(entry.base_price * dec!(1.1)));
                assert!(price >= round_currency(entry.base_price * dec!(0.9)).max(dec!(0.01)));
            }
        }
    }

    #[test]
    fn history_respects_category_direction() {
        let accounts = vec!["a1".to_string(), "a2".to_string()];
        let now = now_naive();
        let history = transaction_history(&accounts, now);
        assert_eq!(history.len(), HISTORY_SIZE);
        for transaction in &history {
            assert!(accounts.contains(&transaction.account_id));
            assert!(transaction.transaction_date >= now - Duration::days(HISTORY_DAYS));
            assert!(!transaction.amount.is_zero());
            match transaction.category.as_str() {
                "Stipendio" | "Bonus" => assert!(transaction.amount > Decimal::ZERO),
                "Investimenti" => {}
                _ => assert!(transaction.amount < Decimal::ZERO),
            }
            let reference = transaction.reference_number.as_deref().unwrap_or_default();
            assert!(reference.starts_with("TXN-"));
        }
    }

    #[test]
    fn catalog_symbols_are_unique() {
        let mut symbols: Vec<_> = catalog().iter().map(|e| e.symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 10);
    }
}
