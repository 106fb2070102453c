//! Quote model and its lifecycle.
//!
//! A [`Quote`] owns the job details, shifts and extras for one job. Its
//! [`QuoteStatus`] moves through `draft → quoted → invoice → closed` and
//! decides whether those inputs may be edited. The status never affects how
//! a shift is priced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Shift;

/// Where a quote is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Being built, freely editable.
    #[default]
    Draft,
    /// Saved and sent to the customer, locked.
    Quoted,
    /// Converted to a draft invoice, editable to record actuals.
    Invoice,
    /// Invoice finalised, locked.
    Closed,
}

impl QuoteStatus {
    /// Returns true when the quote's inputs may not be edited.
    pub fn is_locked(&self) -> bool {
        matches!(self, QuoteStatus::Quoted | QuoteStatus::Closed)
    }

    /// Returns true when moving from `self` to `next` is allowed.
    ///
    /// Unlocking sends a quoted job back to draft and a closed invoice back
    /// to invoice.
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (QuoteStatus::Draft, QuoteStatus::Quoted)
                | (QuoteStatus::Quoted, QuoteStatus::Draft)
                | (QuoteStatus::Quoted, QuoteStatus::Invoice)
                | (QuoteStatus::Invoice, QuoteStatus::Closed)
                | (QuoteStatus::Closed, QuoteStatus::Invoice)
        )
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Quoted => write!(f, "quoted"),
            QuoteStatus::Invoice => write!(f, "invoice"),
            QuoteStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Job-level details of a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    /// The job number.
    #[serde(default)]
    pub job_no: String,
    /// The customer name. Picks customer-specific rates when configured.
    #[serde(default)]
    pub customer: String,
    /// Where the work is done.
    #[serde(default)]
    pub location: String,
    /// Technicians assigned to the job.
    #[serde(default)]
    pub technicians: Vec<String>,
    /// Free-text description of the work.
    #[serde(default)]
    pub description: String,
    /// Hours of office reporting time billed on the job.
    #[serde(default)]
    pub reporting_time: Decimal,
    /// Whether the per-kilometre travel charge is billed.
    #[serde(default)]
    pub include_travel_charge: bool,
    /// Kilometres billed under the travel charge.
    #[serde(default)]
    pub travel_distance_km: Decimal,
    /// The amount originally quoted, used to report variance on invoices.
    #[serde(default)]
    pub quoted_amount: Option<Decimal>,
    /// Why the invoiced amount differs from the quote.
    #[serde(default)]
    pub variance_reason: Option<String>,
}

/// A flat extra line item (materials, hire, etc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    /// Unique identifier for the extra.
    pub id: String,
    /// What the extra is for.
    pub description: String,
    /// The dollar amount of the extra.
    #[serde(default)]
    pub cost: Decimal,
}

/// A quote (or invoice) for one job.
///
/// # Example
///
/// ```
/// use quote_engine::models::{Quote, QuoteStatus};
///
/// let mut quote = Quote::new("q_001");
/// quote.job_details.customer = "Acme Mining".to_string();
///
/// quote.transition_to(QuoteStatus::Quoted).unwrap();
/// assert!(quote.is_locked());
/// assert!(quote.transition_to(QuoteStatus::Closed).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for the quote.
    pub id: String,
    /// The lifecycle status.
    #[serde(default)]
    pub status: QuoteStatus,
    /// Job-level details.
    #[serde(default)]
    pub job_details: JobDetails,
    /// Shifts worked or planned on the job.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Flat extras added to the job.
    #[serde(default)]
    pub extras: Vec<Extra>,
}

impl Quote {
    /// Creates an empty draft quote with a single default technician.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: QuoteStatus::Draft,
            job_details: JobDetails {
                technicians: vec!["Tech 1".to_string()],
                ..JobDetails::default()
            },
            shifts: Vec::new(),
            extras: Vec::new(),
        }
    }

    /// Returns true when the quote's inputs may not be edited.
    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }

    /// Moves the quote to a new status.
    ///
    /// Saving a draft as a quote requires a customer name.
    pub fn transition_to(&mut self, next: QuoteStatus) -> EngineResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        if next == QuoteStatus::Quoted && self.job_details.customer.trim().is_empty() {
            return Err(EngineError::InvalidQuote {
                field: "customer".to_string(),
                message: "a customer name is required before saving a quote".to_string(),
            });
        }
        tracing::debug!(quote_id = %self.id, from = %self.status, to = %next, "Quote status changed");
        self.status = next;
        Ok(())
    }

    fn ensure_editable(&self) -> EngineResult<()> {
        if self.is_locked() {
            return Err(EngineError::QuoteLocked {
                status: self.status.to_string(),
            });
        }
        Ok(())
    }

    /// Replaces the job details.
    pub fn set_job_details(&mut self, details: JobDetails) -> EngineResult<()> {
        self.ensure_editable()?;
        self.job_details = details;
        Ok(())
    }

    /// Appends a shift.
    pub fn add_shift(&mut self, shift: Shift) -> EngineResult<()> {
        self.ensure_editable()?;
        self.shifts.push(shift);
        Ok(())
    }

    /// Replaces the shift with the same ID.
    pub fn update_shift(&mut self, shift: Shift) -> EngineResult<()> {
        self.ensure_editable()?;
        let slot = self
            .shifts
            .iter_mut()
            .find(|s| s.id == shift.id)
            .ok_or_else(|| EngineError::InvalidQuote {
                field: "shifts".to_string(),
                message: format!("no shift with id '{}'", shift.id),
            })?;
        *slot = shift;
        Ok(())
    }

    /// Removes the shift with the given ID, if present.
    pub fn remove_shift(&mut self, shift_id: &str) -> EngineResult<()> {
        self.ensure_editable()?;
        self.shifts.retain(|s| s.id != shift_id);
        Ok(())
    }

    /// Appends an extra.
    pub fn add_extra(&mut self, extra: Extra) -> EngineResult<()> {
        self.ensure_editable()?;
        self.extras.push(extra);
        Ok(())
    }

    /// Removes the extra with the given ID, if present.
    pub fn remove_extra(&mut self, extra_id: &str) -> EngineResult<()> {
        self.ensure_editable()?;
        self.extras.retain(|e| e.id != extra_id);
        Ok(())
    }

    /// Appends a technician named `Tech N`, where N is the new headcount,
    /// and returns the name.
    pub fn add_technician(&mut self) -> EngineResult<String> {
        self.ensure_editable()?;
        let name = format!("Tech {}", self.job_details.technicians.len() + 1);
        self.job_details.technicians.push(name.clone());
        Ok(name)
    }

    /// Removes the technician at `index`. A job keeps at least one
    /// technician; shifts assigned to the removed name are left as they are.
    pub fn remove_technician(&mut self, index: usize) -> EngineResult<String> {
        self.ensure_editable()?;
        let technicians = &mut self.job_details.technicians;
        if index >= technicians.len() {
            return Err(EngineError::InvalidQuote {
                field: "technicians".to_string(),
                message: format!("no technician at position {}", index),
            });
        }
        if technicians.len() <= 1 {
            return Err(EngineError::InvalidQuote {
                field: "technicians".to_string(),
                message: "a job needs at least one technician".to_string(),
            });
        }
        Ok(technicians.remove(index))
    }

    /// Renames a job technician and every shift assigned to them.
    pub fn rename_technician(&mut self, index: usize, new_name: &str) -> EngineResult<()> {
        self.ensure_editable()?;
        let old_name = self
            .job_details
            .technicians
            .get(index)
            .cloned()
            .ok_or_else(|| EngineError::InvalidQuote {
                field: "technicians".to_string(),
                message: format!("no technician at position {}", index),
            })?;

        self.job_details.technicians[index] = new_name.to_string();
        for shift in self.shifts.iter_mut().filter(|s| s.tech == old_name) {
            shift.tech = new_name.to_string();
        }
        Ok(())
    }
}
