use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::SortDirection;
use crate::models::{BjcpCategory, Competition, CompetitionEntry};

/// Request payload for submitting a new competition entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitEntryRequest {
    pub competition_id: Uuid,

    pub bjcp_category_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Beer name must be between 1 and 255 characters"
    ))]
    pub beer_name: String,

    #[validate(length(max = 2000))]
    pub beer_notes: Option<String>,
}

/// Request payload for editing an entry before the deadline
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryRequest {
    #[validate(length(min = 1, max = 255))]
    pub beer_name: Option<String>,

    #[validate(length(max = 2000))]
    pub beer_notes: Option<String>,

    pub bjcp_category_id: Option<Uuid>,
}

/// Request payload for the officer payment toggle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub entry_fee_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionInfo {
    pub competition_id: Uuid,
    pub name: String,
    pub entry_deadline: DateTime<Utc>,
    pub judging_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub results_published: bool,
}

impl From<&Competition> for CompetitionInfo {
    fn from(comp: &Competition) -> Self {
        Self {
            competition_id: comp.competition_id,
            name: comp.name.clone(),
            entry_deadline: comp.entry_deadline,
            judging_date: comp.judging_date,
            active: comp.active,
            results_published: comp.results_published,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInfo {
    pub category_id: Uuid,
    pub category_number: String,
    pub subcategory_letter: Option<String>,
    pub subcategory_name: Option<String>,
    pub category_name: String,
}

impl From<&BjcpCategory> for CategoryInfo {
    fn from(cat: &BjcpCategory) -> Self {
        Self {
            category_id: cat.category_id,
            category_number: cat.category_number.clone(),
            subcategory_letter: cat.subcategory_letter.clone(),
            subcategory_name: cat.subcategory_name.clone(),
            category_name: cat.category_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultInfo {
    pub score: Option<i16>,
    pub placement: Option<String>,
    pub judge_notes: Option<String>,
}

/// A member's entry joined with its competition, category, and any
/// published result, plus the convenience fields the portal shows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryResponse {
    #[serde(flatten)]
    pub entry: CompetitionEntry,
    pub competition: CompetitionInfo,
    pub bjcp_category: Option<CategoryInfo>,
    pub result: Option<ResultInfo>,
    pub category_display: String,
    pub can_edit: bool,
    pub days_until_deadline: i64,
    pub has_results: bool,
}

/// Aggregate counts over a member's entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EntryStats {
    pub total: usize,
    pub active: usize,
    pub past: usize,
    pub paid: usize,
    pub pending_payment: usize,
}

/// Entries grouped under their competition, deadline-descending
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionEntryGroup {
    pub competition: CompetitionInfo,
    pub entries: Vec<EntryResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyEntriesResponse {
    pub entries: Vec<EntryResponse>,
    pub by_competition: Vec<CompetitionEntryGroup>,
    pub stats: EntryStats,
}

/// Flattened roster row for the officer entry list: entry fields plus
/// brewer and style details joined in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryRosterRow {
    #[serde(flatten)]
    pub entry: CompetitionEntry,
    pub member_name: String,
    pub member_email: String,
    pub member_phone: Option<String>,
    pub category_number: String,
    pub subcategory_letter: Option<String>,
    pub subcategory_name: Option<String>,
    pub category_name: String,
    pub category_display: String,
}

/// Columns the officer roster can be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntrySortColumn {
    #[default]
    EntryNumber,
    MemberName,
    BeerName,
    Category,
    Paid,
    SubmittedAt,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EntryRosterQuery {
    #[serde(flatten)]
    pub pagination: super::common::PaginationParams,
    #[serde(default)]
    pub sort: EntrySortColumn,
    #[serde(default)]
    pub direction: SortDirection,
}
