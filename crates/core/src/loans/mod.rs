//! Loans module - amortization, debt-to-income evaluation, loan booking and
//! the deferred underwriting workflow.

pub mod amortization;
pub mod dti;
mod loan_terms;
mod loans_model;
mod loans_repository;
mod loans_service;
mod loans_traits;
mod underwriting;
mod underwriting_tests;

pub use amortization::{loan_preview, monthly_payment, term_months_from_years, LoanPreview};
pub use dti::{assess, DtiEvaluator, DtiInput};
pub use loan_terms::{policy, LoanTerms};
pub use loans_model::{
    EmploymentStatus, Loan, LoanApplication, LoanApplicationReceipt, LoanApplicationRequest,
    LoanApplicationStatus, LoanEvaluation, LoanLimits, LoanStatus, LoanType, NewLoan,
};
pub use loans_repository::{LoanApplicationRepository, LoanRepository};
pub use loans_service::LoanService;
pub use loans_traits::{
    LoanApplicationRepositoryTrait, LoanRepositoryTrait, LoanServiceTrait, UnderwritingScheduler,
    UnderwritingServiceTrait,
};
pub use underwriting::{MockUnderwritingScheduler, UnderwritingService};
