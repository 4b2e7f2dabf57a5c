//! # Launchpad ledger
//!
//! Owns the collection of [`LaunchpadProject`]s. A project is derived from an
//! active console token and refers to it by id only; the token itself is
//! never touched here.
//!
//! ```text
//! create_project ──► Live ──(now ≥ end_time, refresh_statuses)──► Ended
//! ```
//!
//! How contributions interact with the hard cap is left to a pluggable
//! [`ContributionPolicy`]. The default, [`Uncapped`], accepts every positive
//! contribution in full.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::ids::IdGenerator;
use crate::types::{LaunchpadProject, LaunchpadStatus, Token};
use crate::{Error, Result};

/// Parameters chosen by the project creator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectTerms {
    pub soft_cap: f64,
    pub hard_cap: f64,
    /// Tokens per native unit.
    pub rate: f64,
    pub duration_days: u32,
}

/// Decides how much of a contribution a project takes.
///
/// Returns the accepted amount (which may be less than offered) or a
/// rejection reason.
pub trait ContributionPolicy {
    fn admit(
        &self,
        project: &LaunchpadProject,
        amount: f64,
        now: DateTime<Utc>,
    ) -> std::result::Result<f64, String>;
}

/// Accepts everything; raised amounts may exceed the hard cap.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uncapped;

impl ContributionPolicy for Uncapped {
    fn admit(
        &self,
        _project: &LaunchpadProject,
        amount: f64,
        _now: DateTime<Utc>,
    ) -> std::result::Result<f64, String> {
        Ok(amount)
    }
}

pub struct LaunchpadLedger {
    projects: Vec<LaunchpadProject>,
    policy: Box<dyn ContributionPolicy>,
}

impl fmt::Debug for LaunchpadLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchpadLedger")
            .field("projects", &self.projects)
            .finish_non_exhaustive()
    }
}

impl Default for LaunchpadLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchpadLedger {
    pub fn new() -> Self {
        Self::from_projects(Vec::new())
    }

    /// Rebuild from a persisted snapshot.
    pub fn from_projects(projects: Vec<LaunchpadProject>) -> Self {
        Self {
            projects,
            policy: Box::new(Uncapped),
        }
    }

    pub fn set_policy(&mut self, policy: impl ContributionPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    pub fn projects(&self) -> &[LaunchpadProject] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&LaunchpadProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Register a new live project for `token`.
    pub fn create_project(
        &mut self,
        token: &Token,
        terms: ProjectTerms,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<LaunchpadProject> {
        if !token.is_active() {
            return Err(Error::TokenNotActive);
        }
        let caps = [terms.soft_cap, terms.hard_cap];
        if !caps.iter().all(|c| c.is_finite() && *c > 0.0) {
            return Err(Error::InvalidCaps);
        }
        if terms.hard_cap <= terms.soft_cap {
            return Err(Error::InvalidCaps);
        }
        if !(terms.rate.is_finite() && terms.rate > 0.0) {
            return Err(Error::InvalidRate);
        }
        if terms.duration_days == 0 {
            return Err(Error::InvalidDuration);
        }
        let end_time = now
            .checked_add_signed(Duration::days(i64::from(terms.duration_days)))
            .ok_or(Error::InvalidDuration)?;

        let project = LaunchpadProject {
            id: ids.project_id(now),
            token_id: token.id.clone(),
            token_name: token.name.clone(),
            token_symbol: token.symbol.clone(),
            token_logo: token.logo.clone(),
            chain: token.chain,
            soft_cap: terms.soft_cap,
            hard_cap: terms.hard_cap,
            rate: terms.rate,
            raised_amount: 0.0,
            participants: 0,
            start_time: now,
            end_time,
            status: LaunchpadStatus::Live,
        };
        self.projects.push(project.clone());

        tracing::info!(
            project = %project.id,
            token = %project.token_id,
            soft_cap = project.soft_cap,
            hard_cap = project.hard_cap,
            "launchpad project created"
        );
        Ok(project)
    }

    /// Add a contribution of `amount` native units from one participant.
    pub fn record_contribution(
        &mut self,
        project_id: &str,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<LaunchpadProject> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(Error::InvalidAmount);
        }
        let index = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or(Error::ProjectNotFound)?;

        let accepted = self
            .policy
            .admit(&self.projects[index], amount, now)
            .map_err(Error::ContributionRejected)?;
        if !(accepted.is_finite() && accepted > 0.0) {
            return Err(Error::ContributionRejected(
                "policy admitted nothing".to_string(),
            ));
        }

        let raised_amount = project_raise(&self.projects[index], accepted)?;

        let project = &mut self.projects[index];
        project.raised_amount = raised_amount;
        project.participants = project.participants.saturating_add(1);

        tracing::info!(
            project = %project.id,
            accepted,
            raised = project.raised_amount,
            "contribution recorded"
        );
        Ok(project.clone())
    }

    /// Mark every live project whose window has closed as ended. Returns the
    /// ids that changed.
    pub fn refresh_statuses(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut ended = Vec::new();
        for project in self
            .projects
            .iter_mut()
            .filter(|p| p.status == LaunchpadStatus::Live && now >= p.end_time)
        {
            project.status = LaunchpadStatus::Ended;
            ended.push(project.id.clone());
        }
        ended
    }
}

fn project_raise(project: &LaunchpadProject, accepted: f64) -> Result<f64> {
    let raised = project.raised_amount + accepted;
    if raised.is_finite() {
        Ok(raised)
    } else {
        Err(Error::AmountOverflow)
    }
}
