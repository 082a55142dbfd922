//! Sorting, grouping, and aggregate counters for entry listings.

use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::common::SortDirection;
use crate::dto::entry::{
    CompetitionEntryGroup, EntryResponse, EntryRosterRow, EntrySortColumn, EntryStats,
};

/// Sort the officer roster in place. `sort_by` is stable, so rows with
/// equal keys keep their relative order.
pub fn sort_roster(rows: &mut [EntryRosterRow], column: EntrySortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &EntryRosterRow, b: &EntryRosterRow, column: EntrySortColumn) -> Ordering {
    match column {
        EntrySortColumn::EntryNumber => a.entry.entry_number.cmp(&b.entry.entry_number),
        EntrySortColumn::MemberName => a.member_name.cmp(&b.member_name),
        EntrySortColumn::BeerName => a.entry.beer_name.cmp(&b.entry.beer_name),
        EntrySortColumn::Category => category_key(a).cmp(&category_key(b)),
        EntrySortColumn::Paid => a.entry.entry_fee_paid.cmp(&b.entry.entry_fee_paid),
        EntrySortColumn::SubmittedAt => a.entry.submitted_at.cmp(&b.entry.submitted_at),
    }
}

fn category_key(row: &EntryRosterRow) -> String {
    format!(
        "{}{}",
        row.category_number,
        row.subcategory_letter.as_deref().unwrap_or_default()
    )
}

/// Group a member's entries by competition; groups ordered by entry
/// deadline, most recent first.
pub fn group_by_competition(entries: &[EntryResponse]) -> Vec<CompetitionEntryGroup> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut groups: HashMap<Uuid, CompetitionEntryGroup> = HashMap::new();

    for entry in entries {
        let comp_id = entry.competition.competition_id;
        groups
            .entry(comp_id)
            .or_insert_with(|| {
                order.push(comp_id);
                CompetitionEntryGroup {
                    competition: entry.competition.clone(),
                    entries: Vec::new(),
                }
            })
            .entries
            .push(entry.clone());
    }

    let mut grouped: Vec<CompetitionEntryGroup> = order
        .into_iter()
        .filter_map(|id| groups.remove(&id))
        .collect();
    grouped.sort_by(|a, b| b.competition.entry_deadline.cmp(&a.competition.entry_deadline));
    grouped
}

/// Aggregate counters for a member's entry list. "Active" follows the
/// edit window (competition active and deadline not passed).
pub fn entry_stats(entries: &[EntryResponse]) -> EntryStats {
    let mut stats = EntryStats {
        total: entries.len(),
        ..EntryStats::default()
    };

    for entry in entries {
        if entry.can_edit {
            stats.active += 1;
        } else {
            stats.past += 1;
        }

        if entry.entry.entry_fee_paid {
            stats.paid += 1;
        } else {
            stats.pending_payment += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::entry::{CategoryInfo, CompetitionInfo};
    use crate::models::CompetitionEntry;
    use chrono::{DateTime, Duration, Utc};

    fn roster_row(number: &str, member: &str, paid: bool, submitted: DateTime<Utc>) -> EntryRosterRow {
        EntryRosterRow {
            entry: CompetitionEntry {
                entry_id: Uuid::new_v4(),
                competition_id: Uuid::new_v4(),
                member_id: Uuid::new_v4(),
                bjcp_category_id: Uuid::new_v4(),
                beer_name: format!("Beer {number}"),
                beer_notes: None,
                entry_number: number.to_string(),
                entry_fee_paid: paid,
                payment_date: None,
                submitted_at: submitted,
                updated_at: None,
            },
            member_name: member.to_string(),
            member_email: format!("{member}@example.com"),
            member_phone: None,
            category_number: "21".to_string(),
            subcategory_letter: Some("A".to_string()),
            subcategory_name: Some("American IPA".to_string()),
            category_name: "IPA".to_string(),
            category_display: "21A - IPA: American IPA".to_string(),
        }
    }

    fn member_entry(
        competition_id: Uuid,
        deadline: DateTime<Utc>,
        can_edit: bool,
        paid: bool,
    ) -> EntryResponse {
        EntryResponse {
            entry: CompetitionEntry {
                entry_id: Uuid::new_v4(),
                competition_id,
                member_id: Uuid::new_v4(),
                bjcp_category_id: Uuid::new_v4(),
                beer_name: "Saison".to_string(),
                beer_notes: None,
                entry_number: "00010".to_string(),
                entry_fee_paid: paid,
                payment_date: None,
                submitted_at: Utc::now(),
                updated_at: None,
            },
            competition: CompetitionInfo {
                competition_id,
                name: "Comp".to_string(),
                entry_deadline: deadline,
                judging_date: None,
                active: can_edit,
                results_published: false,
            },
            bjcp_category: Some(CategoryInfo {
                category_id: Uuid::new_v4(),
                category_number: "25".to_string(),
                subcategory_letter: Some("B".to_string()),
                subcategory_name: Some("Saison".to_string()),
                category_name: "Strong Belgian Ale".to_string(),
            }),
            result: None,
            category_display: "25B - Saison".to_string(),
            can_edit,
            days_until_deadline: 0,
            has_results: false,
        }
    }

    #[test]
    fn entry_number_sort_is_lexicographic_on_padded_numbers() {
        let now = Utc::now();
        let mut rows = vec![
            roster_row("00042", "a", false, now),
            roster_row("00007", "b", false, now),
            roster_row("00099", "c", false, now),
        ];

        sort_roster(&mut rows, EntrySortColumn::EntryNumber, SortDirection::Asc);
        let numbers: Vec<&str> = rows.iter().map(|r| r.entry.entry_number.as_str()).collect();
        assert_eq!(numbers, ["00007", "00042", "00099"]);

        sort_roster(&mut rows, EntrySortColumn::EntryNumber, SortDirection::Desc);
        let numbers: Vec<&str> = rows.iter().map(|r| r.entry.entry_number.as_str()).collect();
        assert_eq!(numbers, ["00099", "00042", "00007"]);
    }

    #[test]
    fn equal_keys_keep_relative_order() {
        let now = Utc::now();
        let mut rows = vec![
            roster_row("00003", "zoe", true, now),
            roster_row("00001", "zoe", true, now),
            roster_row("00002", "zoe", true, now),
        ];

        sort_roster(&mut rows, EntrySortColumn::MemberName, SortDirection::Asc);
        let numbers: Vec<&str> = rows.iter().map(|r| r.entry.entry_number.as_str()).collect();
        assert_eq!(numbers, ["00003", "00001", "00002"]);
    }

    #[test]
    fn submitted_at_sorts_chronologically() {
        let base = Utc::now();
        let mut rows = vec![
            roster_row("00001", "a", false, base),
            roster_row("00002", "b", false, base - Duration::days(2)),
            roster_row("00003", "c", false, base - Duration::days(1)),
        ];

        sort_roster(&mut rows, EntrySortColumn::SubmittedAt, SortDirection::Asc);
        let numbers: Vec<&str> = rows.iter().map(|r| r.entry.entry_number.as_str()).collect();
        assert_eq!(numbers, ["00002", "00003", "00001"]);
    }

    #[test]
    fn groups_ordered_by_deadline_descending() {
        let now = Utc::now();
        let older = Uuid::new_v4();
        let newer = Uuid::new_v4();
        let entries = vec![
            member_entry(older, now - Duration::days(30), false, true),
            member_entry(newer, now + Duration::days(5), true, false),
            member_entry(older, now - Duration::days(30), false, false),
        ];

        let groups = group_by_competition(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].competition.competition_id, newer);
        assert_eq!(groups[1].entries.len(), 2);
    }

    #[test]
    fn stats_split_active_past_and_payment() {
        let now = Utc::now();
        let comp = Uuid::new_v4();
        let entries = vec![
            member_entry(comp, now + Duration::days(5), true, true),
            member_entry(comp, now - Duration::days(5), false, true),
            member_entry(comp, now - Duration::days(5), false, false),
        ];

        let stats = entry_stats(&entries);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.past, 2);
        assert_eq!(stats.paid, 2);
        assert_eq!(stats.pending_payment, 1);
    }

    #[test]
    fn empty_list_yields_default_stats() {
        assert_eq!(entry_stats(&[]), EntryStats::default());
    }
}
