#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::accounts::{
        Account, AccountRepository, AccountRepositoryTrait, AccountType, NewAccount,
    };
    use crate::errors::Error;
    use crate::ledger::LedgerStore;
    use crate::notifications::{
        NotificationKind, NotificationRepository, NotificationService, NotificationServiceTrait,
    };
    use crate::settings::LedgerSettings;
    use crate::transactions::{
        NewTransaction, TransactionRepository, TransactionService, TransactionServiceTrait,
        Transfer,
    };

    struct Fixture {
        store: Arc<LedgerStore>,
        accounts: Arc<AccountRepository>,
        notifications: Arc<NotificationService>,
        service: TransactionService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(LedgerStore::new());
        let accounts = Arc::new(AccountRepository::new(store.clone()));
        let notifications = Arc::new(NotificationService::new(Arc::new(
            NotificationRepository::new(store.clone()),
        )));
        let service = TransactionService::new(
            store.clone(),
            Arc::new(TransactionRepository::new(store.clone())),
            accounts.clone(),
            notifications.clone(),
            LedgerSettings::default(),
        );
        Fixture {
            store,
            accounts,
            notifications,
            service,
        }
    }

    fn open_account(f: &Fixture, user_id: &str, balance: Decimal) -> Account {
        f.accounts
            .create(NewAccount {
                user_id: user_id.to_string(),
                name: "Checking".to_string(),
                account_type: AccountType::Checking,
                initial_balance: balance,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_transfer_updates_balance_and_records_row() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(500));

        let txn = f
            .service
            .transfer(Transfer::new(&account.id, dec!(-120.456), "Groceries", "Food"))
            .await
            .unwrap();

        assert_eq!(txn.amount, dec!(-120.46));
        assert!(txn.is_debit());
        let reference = txn.reference_number.clone().unwrap();
        assert!(reference.starts_with("TXN-"));
        assert_eq!(reference.len(), 12);

        let updated = f.accounts.get_by_id(&account.id).unwrap();
        assert_eq!(updated.balance, dec!(379.54));
        let stored = f.store.read(|l| l.transactions.len()).unwrap();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_transfer_rejects_zero_and_blank_fields() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(10));

        let zero = f
            .service
            .transfer(Transfer::new(&account.id, Decimal::ZERO, "x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(zero, Error::Validation(_)));

        let blank = f
            .service
            .transfer(Transfer::new(&account.id, dec!(5), "  ", "y"))
            .await
            .unwrap_err();
        assert!(matches!(blank, Error::Validation(_)));

        assert_eq!(f.accounts.get_by_id(&account.id).unwrap().balance, dec!(10));
    }

    #[tokio::test]
    async fn test_transfer_unknown_account_leaves_no_row() {
        let f = fixture();
        let err = f
            .service
            .transfer(Transfer::new("missing", dec!(5), "x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(f.store.read(|l| l.transactions.len()).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transfer_does_not_check_solvency() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(10));
        f.service
            .transfer(Transfer::new(&account.id, dec!(-50), "Overdraft", "Misc"))
            .await
            .unwrap();
        assert_eq!(f.accounts.get_by_id(&account.id).unwrap().balance, dec!(-40));
    }

    #[tokio::test]
    async fn test_overflowing_transfer_is_rejected_and_store_stays_usable() {
        let f = fixture();
        let account = open_account(&f, "u1", Decimal::MAX - dec!(1));

        let err = f
            .service
            .transfer(Transfer::new(&account.id, dec!(1000), "Bonus", "Income"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Calculation(_)));

        assert_eq!(
            f.accounts.get_by_id(&account.id).unwrap().balance,
            Decimal::MAX - dec!(1)
        );
        assert_eq!(f.store.read(|l| l.transactions.len()).unwrap(), 0);
        assert_eq!(f.notifications.get_unread_count("u1").unwrap(), 0);

        f.service
            .transfer(Transfer::new(&account.id, dec!(-1000), "Rent", "Housing"))
            .await
            .unwrap();
        assert_eq!(f.store.read(|l| l.transactions.len()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_large_transactions_notify_owner() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(5000));

        f.service
            .transfer(Transfer::new(&account.id, dec!(999.99), "Small", "Misc"))
            .await
            .unwrap();
        assert_eq!(f.notifications.get_unread_count("u1").unwrap(), 0);

        f.service
            .transfer(Transfer::new(&account.id, dec!(1000), "Salary", "Income"))
            .await
            .unwrap();
        f.service
            .transfer(Transfer::new(&account.id, dec!(-2500), "Rent", "Housing"))
            .await
            .unwrap();

        let notes = f.notifications.get_user_notifications("u1", None).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].kind, NotificationKind::Info);
        assert!(notes[0].message.contains("Rent"));
        assert_eq!(notes[1].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_reference_prefix_and_explicit_reference() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(100));

        let bought = f
            .service
            .transfer(
                Transfer::new(&account.id, dec!(-10), "Buy", "Investments")
                    .with_reference_prefix("BUY"),
            )
            .await
            .unwrap();
        assert!(bought.reference_number.unwrap().starts_with("BUY-"));

        let loan = f
            .service
            .transfer(
                Transfer::new(&account.id, dec!(10), "Loan", "Loans").with_reference("LOAN-ABCD1234"),
            )
            .await
            .unwrap();
        assert_eq!(loan.reference_number.as_deref(), Some("LOAN-ABCD1234"));
    }

    #[tokio::test]
    async fn test_create_transaction_checks_ownership() {
        let f = fixture();
        let account = open_account(&f, "owner", dec!(100));

        let err = f
            .service
            .create_transaction(
                "intruder",
                NewTransaction {
                    account_id: account.id.clone(),
                    amount: dec!(-10),
                    description: "Coffee".to_string(),
                    category: "Food".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        let txn = f
            .service
            .create_transaction(
                "owner",
                NewTransaction {
                    account_id: account.id.clone(),
                    amount: dec!(-10),
                    description: "Coffee".to_string(),
                    category: "Food".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(txn.account_id, account.id);
    }

    #[tokio::test]
    async fn test_recent_transactions_newest_first_with_limit() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(100));
        let base = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        for day in 0..3 {
            f.service
                .transfer(
                    Transfer::new(&account.id, dec!(-1), format!("Day {}", day), "Misc")
                        .occurred_at(base + Duration::days(day)),
                )
                .await
                .unwrap();
        }

        let recent = f
            .service
            .get_user_recent_transactions("u1", Some(2))
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "Day 2");
        assert_eq!(recent[1].description, "Day 1");
    }

    #[tokio::test]
    async fn test_monthly_aggregates_and_variation() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(10000));
        let ids = vec![account.id.clone()];
        let now = NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let last_month = now - Duration::days(30);

        for (amount, at) in [
            (dec!(-200), last_month),
            (dec!(-150), now),
            (dec!(-150), now),
            (dec!(3000), now),
        ] {
            f.service
                .transfer(Transfer::new(&account.id, amount, "Entry", "Misc").occurred_at(at))
                .await
                .unwrap();
        }

        assert_eq!(f.service.get_monthly_expenses(&ids, now).unwrap(), dec!(300));
        assert_eq!(f.service.get_monthly_income(&ids, now).unwrap(), dec!(3000));
        assert_eq!(f.service.get_expense_variation(&ids, now).unwrap(), dec!(50));
    }

    #[tokio::test]
    async fn test_expense_variation_with_empty_previous_month() {
        let f = fixture();
        let account = open_account(&f, "u1", dec!(100));
        let ids = vec![account.id.clone()];
        let now = NaiveDate::from_ymd_opt(2025, 1, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(f.service.get_expense_variation(&ids, now).unwrap(), Decimal::ZERO);

        f.service
            .transfer(Transfer::new(&account.id, dec!(-20), "Lunch", "Food").occurred_at(now))
            .await
            .unwrap();
        assert_eq!(
            f.service.get_expense_variation(&ids, now).unwrap(),
            Decimal::ONE_HUNDRED
        );
    }
}
