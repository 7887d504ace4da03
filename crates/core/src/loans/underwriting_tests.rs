#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::accounts::{AccountRepository, AccountRepositoryTrait, AccountType, NewAccount};
    use crate::errors::{Error, Result};
    use crate::ledger::LedgerStore;
    use crate::loans::{
        DtiEvaluator, EmploymentStatus, Loan, LoanApplicationRepository, LoanApplicationRequest,
        LoanApplicationStatus, LoanLimits, LoanRepository, LoanService, LoanServiceTrait,
        LoanType, MockUnderwritingScheduler, NewLoan, UnderwritingScheduler, UnderwritingService,
        UnderwritingServiceTrait,
    };
    use crate::notifications::{
        NotificationKind, NotificationRepository, NotificationService, NotificationServiceTrait,
    };
    use crate::settings::LedgerSettings;
    use crate::transactions::{TransactionRepository, TransactionService};

    struct ClosedScheduler;

    impl UnderwritingScheduler for ClosedScheduler {
        fn schedule(&self, _application_id: &str) -> Result<()> {
            Err(Error::Unexpected("queue closed".to_string()))
        }
    }

    /// Delegates to a real loan service but cannot book loans.
    struct UnavailableLoanDesk {
        inner: Arc<LoanService>,
    }

    #[async_trait]
    impl LoanServiceTrait for UnavailableLoanDesk {
        async fn create_loan(&self, new_loan: NewLoan) -> Result<Loan> {
            self.inner.create_loan(new_loan).await
        }

        async fn provision_loan(&self, _new_loan: NewLoan) -> Result<Loan> {
            Err(Error::ConstraintViolation("loan desk offline".to_string()))
        }

        fn get_loan(&self, loan_id: &str) -> Result<Loan> {
            self.inner.get_loan(loan_id)
        }

        fn get_user_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
            self.inner.get_user_loans(user_id)
        }

        fn get_active_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
            self.inner.get_active_loans(user_id)
        }

        fn get_active_loan_balance(&self, user_id: &str) -> Result<Decimal> {
            self.inner.get_active_loan_balance(user_id)
        }

        fn get_total_monthly_payments(&self, user_id: &str) -> Result<Decimal> {
            self.inner.get_total_monthly_payments(user_id)
        }

        async fn record_payment(
            &self,
            user_id: &str,
            loan_id: &str,
            amount: Decimal,
        ) -> Result<Loan> {
            self.inner.record_payment(user_id, loan_id, amount).await
        }

        fn get_loan_limits(&self, loan_type: &str) -> LoanLimits {
            self.inner.get_loan_limits(loan_type)
        }
    }

    struct Fixture {
        accounts: Arc<AccountRepository>,
        notifications: Arc<NotificationService>,
        loans: Arc<LoanService>,
        scheduler: MockUnderwritingScheduler,
        service: UnderwritingService,
    }

    fn fixture_with(
        scheduler: Option<Arc<dyn UnderwritingScheduler>>,
        provisioning_fails: bool,
    ) -> Fixture {
        let store = Arc::new(LedgerStore::new());
        let accounts = Arc::new(AccountRepository::new(store.clone()));
        let notifications = Arc::new(NotificationService::new(Arc::new(
            NotificationRepository::new(store.clone()),
        )));
        let transactions = Arc::new(TransactionService::new(
            store.clone(),
            Arc::new(TransactionRepository::new(store.clone())),
            accounts.clone(),
            notifications.clone(),
            LedgerSettings::default(),
        ));
        let loans = Arc::new(LoanService::new(
            store.clone(),
            Arc::new(LoanRepository::new(store.clone())),
            accounts.clone(),
            transactions.clone(),
            notifications.clone(),
        ));
        let desk: Arc<dyn LoanServiceTrait> = if provisioning_fails {
            Arc::new(UnavailableLoanDesk {
                inner: loans.clone(),
            })
        } else {
            loans.clone()
        };
        let mock = MockUnderwritingScheduler::new();
        let service = UnderwritingService::new(
            Arc::new(LoanApplicationRepository::new(store)),
            desk,
            DtiEvaluator::new(accounts.clone(), transactions),
            notifications.clone(),
            scheduler.unwrap_or_else(|| Arc::new(mock.clone())),
            60,
        );
        Fixture {
            accounts,
            notifications,
            loans,
            scheduler: mock,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(None, false)
    }

    fn open_checking(f: &Fixture, balance: Decimal) -> String {
        f.accounts
            .create(NewAccount {
                user_id: "u1".to_string(),
                name: "Checking".to_string(),
                account_type: AccountType::Checking,
                initial_balance: balance,
            })
            .unwrap()
            .id
    }

    fn request(amount: Decimal, income: Decimal, status: &str) -> LoanApplicationRequest {
        LoanApplicationRequest {
            user_id: "u1".to_string(),
            loan_type: LoanType::Personal,
            amount,
            purpose: None,
            income,
            employment_status: EmploymentStatus::from(status),
            term_months: None,
        }
    }

    #[tokio::test]
    async fn test_submit_acknowledges_and_schedules() {
        let f = fixture();
        let receipt = f
            .service
            .submit_application(request(dec!(5000), dec!(36000), "employed"))
            .await
            .unwrap();

        assert_eq!(receipt.status, LoanApplicationStatus::Pending);
        assert_eq!(receipt.purpose, "personal loan");
        assert_eq!(receipt.estimated_processing_time, "60 seconds (DTI evaluation)");
        assert_eq!(f.scheduler.scheduled(), vec![receipt.id.clone()]);

        let notes = f.notifications.get_user_notifications("u1", None).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Info);
        assert!(f.loans.get_user_loans("u1").unwrap().is_empty());

        let applications = f.service.get_user_applications("u1").unwrap();
        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].status, LoanApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_validates_request() {
        let f = fixture();
        let err = f
            .service
            .submit_application(request(dec!(5000), dec!(0), "employed"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let mut bad_term = request(dec!(5000), dec!(36000), "employed");
        bad_term.term_months = Some(0);
        assert!(f.service.submit_application(bad_term).await.is_err());
        assert!(f.scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn test_approved_application_provisions_loan() {
        let f = fixture();
        let checking = open_checking(&f, dec!(1000));
        f.service
            .submit_application(request(dec!(5000), dec!(36000), "employed"))
            .await
            .unwrap();

        let id = f.scheduler.take().pop().unwrap();
        let application = f.service.process_application(&id).await.unwrap();

        assert_eq!(application.status, LoanApplicationStatus::Approved);
        assert_eq!(application.dti_ratio, Some(dec!(5.26)));
        assert!(application.decided_at.is_some());

        let loans = f.loans.get_user_loans("u1").unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(application.loan_id.as_deref(), Some(loans[0].id.as_str()));
        assert_eq!(loans[0].interest_rate, dec!(8.5));
        assert_eq!(loans[0].term_months, 36);
        assert_eq!(loans[0].monthly_payment, dec!(157.84));
        assert_eq!(f.accounts.get_by_id(&checking).unwrap().balance, dec!(6000));

        let approved = f
            .notifications
            .get_user_notifications("u1", None)
            .unwrap()
            .into_iter()
            .find(|n| n.title == "Loan Approved")
            .unwrap();
        assert_eq!(approved.kind, NotificationKind::Success);
        assert!(approved.message.contains("DTI: 5.3%"));
    }

    #[tokio::test]
    async fn test_rejected_application_creates_no_loan() {
        let f = fixture();
        f.service
            .submit_application(request(dec!(5000), dec!(18000), "unemployed"))
            .await
            .unwrap();
        let id = f.scheduler.take().pop().unwrap();

        let application = f.service.process_application(&id).await.unwrap();
        assert_eq!(application.status, LoanApplicationStatus::Rejected);
        let reason = application.rejection_reason.unwrap();
        assert!(reason.contains("insufficient income"));
        assert!(reason.contains("'unemployed'"));
        assert!(f.loans.get_user_loans("u1").unwrap().is_empty());

        let notes = f.notifications.get_user_notifications("u1", None).unwrap();
        assert_eq!(notes[0].title, "Loan Rejected");
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_processing_is_not_repeated() {
        let f = fixture();
        open_checking(&f, dec!(0));
        f.service
            .submit_application(request(dec!(2000), dec!(60000), "self_employed"))
            .await
            .unwrap();
        let id = f.scheduler.take().pop().unwrap();

        f.service.process_application(&id).await.unwrap();
        let again = f.service.process_application(&id).await.unwrap();
        assert_eq!(again.status, LoanApplicationStatus::Approved);
        assert_eq!(f.loans.get_user_loans("u1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_application_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.service.process_application("missing").await,
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_scheduling_failure_rejects_record() {
        let f = fixture_with(Some(Arc::new(ClosedScheduler)), false);
        let err = f
            .service
            .submit_application(request(dec!(5000), dec!(36000), "employed"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unexpected(_)));

        let applications = f.service.get_user_applications("u1").unwrap();
        assert_eq!(applications[0].status, LoanApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_provisioning_failure_rejects_with_cause() {
        let f = fixture_with(None, true);
        let checking = open_checking(&f, dec!(1000));
        f.service
            .submit_application(request(dec!(5000), dec!(36000), "employed"))
            .await
            .unwrap();
        let id = f.scheduler.take().pop().unwrap();

        let application = f.service.process_application(&id).await.unwrap();
        assert_eq!(application.status, LoanApplicationStatus::Rejected);
        assert!(application.dti_ratio.is_some());
        assert!(application.loan_id.is_none());
        assert!(application
            .rejection_reason
            .unwrap()
            .contains("loan desk offline"));

        assert!(f.loans.get_user_loans("u1").unwrap().is_empty());
        assert_eq!(f.accounts.get_by_id(&checking).unwrap().balance, dec!(1000));

        let notes = f.notifications.get_user_notifications("u1", None).unwrap();
        assert_eq!(notes[0].title, "Evaluation Error");
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert!(notes[0].message.contains("loan desk offline"));
    }
}
