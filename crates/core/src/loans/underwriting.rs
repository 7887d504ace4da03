//! Deferred loan underwriting.
//!
//! An application moves `pending -> evaluating -> approved | rejected`.
//! Submission stores the record and hands its id to an
//! [`UnderwritingScheduler`]; whoever drains the scheduler later calls
//! [`UnderwritingServiceTrait::process_application`], which evaluates the
//! request and either provisions a loan or rejects it. Failures during
//! processing never escape as errors to the applicant: they end in a
//! rejection and an error notification.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{error, info, warn};
use rust_decimal::RoundingStrategy;

use super::dti::{DtiEvaluator, DtiInput};
use super::loans_model::{
    LoanApplication, LoanApplicationReceipt, LoanApplicationRequest, LoanApplicationStatus,
    NewLoan,
};
use super::loans_traits::{
    LoanApplicationRepositoryTrait, LoanServiceTrait, UnderwritingScheduler,
    UnderwritingServiceTrait,
};
use crate::errors::{Error, Result};
use crate::notifications::{NotificationKind, NotificationServiceTrait};
use crate::utils::{format_currency, new_id, now_naive};

/// Scheduler that only records ids, for driving evaluation by hand.
#[derive(Clone, Default)]
pub struct MockUnderwritingScheduler {
    scheduled: Arc<Mutex<Vec<String>>>,
}

impl MockUnderwritingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids scheduled so far.
    pub fn scheduled(&self) -> Vec<String> {
        self.scheduled.lock().unwrap().clone()
    }

    /// Removes and returns the scheduled ids.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.scheduled.lock().unwrap())
    }
}

impl UnderwritingScheduler for MockUnderwritingScheduler {
    fn schedule(&self, application_id: &str) -> Result<()> {
        self.scheduled
            .lock()
            .unwrap()
            .push(application_id.to_string());
        Ok(())
    }
}

/// Service implementing the underwriting workflow.
pub struct UnderwritingService {
    repository: Arc<dyn LoanApplicationRepositoryTrait>,
    loan_service: Arc<dyn LoanServiceTrait>,
    evaluator: DtiEvaluator,
    notification_service: Arc<dyn NotificationServiceTrait>,
    scheduler: Arc<dyn UnderwritingScheduler>,
    evaluation_delay_secs: u64,
}

impl UnderwritingService {
    pub fn new(
        repository: Arc<dyn LoanApplicationRepositoryTrait>,
        loan_service: Arc<dyn LoanServiceTrait>,
        evaluator: DtiEvaluator,
        notification_service: Arc<dyn NotificationServiceTrait>,
        scheduler: Arc<dyn UnderwritingScheduler>,
        evaluation_delay_secs: u64,
    ) -> Self {
        Self {
            repository,
            loan_service,
            evaluator,
            notification_service,
            scheduler,
            evaluation_delay_secs,
        }
    }

    fn finish(
        &self,
        mut application: LoanApplication,
        status: LoanApplicationStatus,
        reason: Option<String>,
    ) -> Result<LoanApplication> {
        application.status = status;
        application.rejection_reason = reason;
        application.decided_at = Some(now_naive());
        self.repository.update(application)
    }

    fn fail(&self, application: LoanApplication, cause: &Error) -> Result<LoanApplication> {
        error!("Underwriting of {} failed: {}", application.id, cause);
        self.notification_service.notify(
            &application.user_id,
            "Evaluation Error",
            &format!(
                "An error occurred while evaluating your loan application: {}",
                cause
            ),
            NotificationKind::Error,
        );
        self.finish(
            application,
            LoanApplicationStatus::Rejected,
            Some(cause.to_string()),
        )
    }
}

#[async_trait]
impl UnderwritingServiceTrait for UnderwritingService {
    async fn submit_application(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<LoanApplicationReceipt> {
        request.validate()?;
        let purpose = request
            .purpose
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} loan", request.loan_type));

        let application = self.repository.create(LoanApplication {
            id: new_id(),
            user_id: request.user_id.trim().to_string(),
            loan_type: request.loan_type,
            amount: request.amount,
            purpose,
            income: request.income,
            employment_status: request.employment_status,
            term_months: request.term_months,
            status: LoanApplicationStatus::Pending,
            submitted_at: now_naive(),
            decided_at: None,
            dti_ratio: None,
            rejection_reason: None,
            loan_id: None,
        })?;
        info!(
            "Received {} loan application {} from user {}",
            application.loan_type, application.id, application.user_id
        );

        self.notification_service.notify(
            &application.user_id,
            "Loan Application Received",
            &format!(
                "Your {} loan application for {} is under DTI evaluation. \
                 You will be notified of the outcome within {} seconds.",
                application.loan_type,
                format_currency(application.amount),
                self.evaluation_delay_secs
            ),
            NotificationKind::Info,
        );

        if let Err(e) = self.scheduler.schedule(&application.id) {
            self.finish(
                application,
                LoanApplicationStatus::Rejected,
                Some(format!("Evaluation could not be scheduled: {}", e)),
            )?;
            return Err(e);
        }

        Ok(LoanApplicationReceipt {
            id: application.id,
            loan_type: application.loan_type,
            amount: application.amount,
            purpose: application.purpose,
            income: application.income,
            employment_status: application.employment_status,
            status: application.status,
            submitted_date: application.submitted_at,
            message: "Loan application submitted successfully. DTI evaluation in progress."
                .to_string(),
            estimated_processing_time: format!(
                "{} seconds (DTI evaluation)",
                self.evaluation_delay_secs
            ),
        })
    }

    async fn process_application(&self, application_id: &str) -> Result<LoanApplication> {
        let mut application = self.repository.get_by_id(application_id)?;
        if application.status != LoanApplicationStatus::Pending {
            warn!(
                "Skipping application {} in state {:?}",
                application_id, application.status
            );
            return Ok(application);
        }

        application.status = LoanApplicationStatus::Evaluating;
        let mut application = self.repository.update(application)?;

        let evaluation = self.evaluator.evaluate(&DtiInput::from(&application));
        application.dti_ratio = Some(evaluation.dti_ratio);

        if !evaluation.approved {
            info!("Application {} rejected: {}", application.id, evaluation.reason);
            self.notification_service.notify(
                &application.user_id,
                "Loan Rejected",
                &format!(
                    "Your loan application was not approved. {}",
                    evaluation.reason
                ),
                NotificationKind::Error,
            );
            return self.finish(
                application,
                LoanApplicationStatus::Rejected,
                Some(evaluation.reason),
            );
        }

        let provisioned = self
            .loan_service
            .provision_loan(NewLoan {
                user_id: application.user_id.clone(),
                loan_type: application.loan_type,
                amount: application.amount,
                interest_rate: evaluation.interest_rate,
                term_months: evaluation.term_months,
            })
            .await;

        match provisioned {
            Ok(loan) => {
                info!("Application {} approved as loan {}", application.id, loan.id);
                self.notification_service.notify(
                    &application.user_id,
                    "Loan Approved",
                    &format!(
                        "Your {} loan application for {} has been approved! DTI: {:.1}%. \
                         Funds have been credited to your account.",
                        application.loan_type,
                        format_currency(application.amount),
                        evaluation
                            .dti_ratio
                            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
                    ),
                    NotificationKind::Success,
                );
                application.loan_id = Some(loan.id);
                self.finish(application, LoanApplicationStatus::Approved, None)
            }
            Err(e) => self.fail(application, &e),
        }
    }

    fn get_user_applications(&self, user_id: &str) -> Result<Vec<LoanApplication>> {
        self.repository.find_by_user_id(user_id)
    }
}
