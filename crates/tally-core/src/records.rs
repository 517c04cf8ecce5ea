use crate::config::UploadConfig;
use crate::ids::{ActorId, RecordId, SessionId};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Gateway-side mirror of a tracking session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub id: SessionId,
    pub actor: ActorId,
    pub elapsed_seconds: u64,
    pub summary: String,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackingRecord {
    pub fn open_for(id: SessionId, actor: ActorId) -> Self {
        let now = Utc::now();
        Self {
            id,
            actor,
            elapsed_seconds: 0,
            summary: String::new(),
            open: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub actor: ActorId,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(actor: ActorId, title: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            actor,
            title: title.into(),
            status: TaskStatus::Open,
            created_at: Utc::now(),
        }
    }
}

/// A closed tracking session promoted to a billable row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: RecordId,
    pub actor: ActorId,
    pub task_id: Option<RecordId>,
    pub seconds: u64,
    pub note: String,
    pub started_at: DateTime<Utc>,
}

impl TimeEntry {
    pub fn hours(&self) -> f64 {
        self.seconds as f64 / 3600.0
    }
}

/// One line of an invoice or quote. Amounts are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price_cents: i64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price_cents: i64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price_cents,
        }
    }

    pub fn amount_cents(&self) -> i64 {
        (self.unit_price_cents as f64 * self.quantity).round() as i64
    }

    /// Bill a time entry at an hourly rate.
    pub fn from_time_entry(entry: &TimeEntry, hourly_rate_cents: i64) -> Self {
        Self {
            description: entry.note.clone(),
            quantity: entry.hours(),
            unit_price_cents: hourly_rate_cents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    pub actor: ActorId,
    pub client_name: String,
    pub status: InvoiceStatus,
    pub items: Vec<LineItem>,
    /// Fractional tax rate, e.g. 0.19.
    pub tax_rate: f64,
    pub issued_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn new(actor: ActorId, client_name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            actor,
            client_name: client_name.into(),
            status: InvoiceStatus::Draft,
            items: Vec::new(),
            tax_rate: 0.0,
            issued_at: Utc::now(),
            due_at: None,
        }
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.amount_cents()).sum()
    }

    pub fn tax_cents(&self) -> i64 {
        (self.subtotal_cents() as f64 * self.tax_rate).round() as i64
    }

    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents() + self.tax_cents()
    }

    pub fn mark_sent(&mut self, due_at: DateTime<Utc>) {
        self.status = InvoiceStatus::Sent;
        self.due_at = Some(due_at);
    }

    pub fn mark_paid(&mut self) {
        self.status = InvoiceStatus::Paid;
    }

    /// A sent invoice past its due date is overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == InvoiceStatus::Sent && self.due_at.is_some_and(|due| due < now)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invoice(client={}, status={:?}, total={}c)",
            self.client_name,
            self.status,
            self.total_cents()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    pub actor: ActorId,
    pub client_name: String,
    pub status: QuoteStatus,
    pub items: Vec<LineItem>,
    pub tax_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(actor: ActorId, client_name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            actor,
            client_name: client_name.into(),
            status: QuoteStatus::Draft,
            items: Vec::new(),
            tax_rate: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn total_cents(&self) -> i64 {
        let subtotal: i64 = self.items.iter().map(|i| i.amount_cents()).sum();
        subtotal + (subtotal as f64 * self.tax_rate).round() as i64
    }

    /// Accepting a quote produces a draft invoice with the same items.
    pub fn accept(&mut self) -> Invoice {
        self.status = QuoteStatus::Accepted;
        let mut invoice = Invoice::new(self.actor.clone(), self.client_name.clone());
        invoice.items = self.items.clone();
        invoice.tax_rate = self.tax_rate;
        invoice
    }
}

/// Expense receipt used for the yearly tax summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: RecordId,
    pub actor: ActorId,
    pub vendor: String,
    pub category: String,
    pub amount_cents: i64,
    pub date: DateTime<Utc>,
}

impl Receipt {
    pub fn new(
        actor: ActorId,
        vendor: impl Into<String>,
        category: impl Into<String>,
        amount_cents: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            actor,
            vendor: vendor.into(),
            category: category.into(),
            amount_cents,
            date,
        }
    }
}

/// Per-category receipt totals for one tax year.
pub fn tax_summary(receipts: &[Receipt], year: i32) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for receipt in receipts.iter().filter(|r| r.date.year() == year) {
        *totals.entry(receipt.category.clone()).or_insert(0) += receipt.amount_cents;
    }
    totals
}

/// File metadata for an uploaded attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, byte_size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            byte_size,
            mime_type: mime_type.into(),
        }
    }

    /// Check the file against the configured upload limit.
    pub fn within_limit(&self, config: &UploadConfig) -> bool {
        self.byte_size <= config.max_upload_bytes
    }
}

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Business,
}

impl Plan {
    pub fn max_upload_bytes(&self) -> u64 {
        match self {
            Plan::Free => 5 * 1024 * 1024,
            Plan::Pro => 100 * 1024 * 1024,
            Plan::Business => 1024 * 1024 * 1024,
        }
    }

    pub fn max_open_tasks(&self) -> usize {
        match self {
            Plan::Free => 20,
            Plan::Pro | Plan::Business => usize::MAX,
        }
    }

    pub fn monthly_price_cents(&self) -> i64 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 900,
            Plan::Business => 2900,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
            Plan::Business => write!(f, "business"),
        }
    }
}

/// Row tying an actor to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: RecordId,
    pub actor: ActorId,
    pub plan: Plan,
    pub started_at: DateTime<Utc>,
    pub renews_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Every actor starts on the free plan.
    pub fn free(actor: ActorId) -> Self {
        Self {
            id: RecordId::generate(),
            actor,
            plan: Plan::Free,
            started_at: Utc::now(),
            renews_at: None,
        }
    }
}
