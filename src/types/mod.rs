// src/types/mod.rs
pub mod job;
pub mod outreach;
pub mod portfolio;

pub use job::JobPosting;
pub use outreach::{GeneratedOutreach, OutreachDraft};
pub use portfolio::{PortfolioItem, PortfolioKind, PortfolioSnapshot, ReplaceReport};
