use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::common::SortDirection,
    dto::entry::{
        EntryResponse, EntryRosterRow, EntrySortColumn, MyEntriesResponse, SubmitEntryRequest,
        UpdateEntryRequest,
    },
    error::{Result, StorageError},
    models::CompetitionEntry,
    repository::category::CategoryRepository,
    repository::competition::CompetitionRepository,
    repository::entry::EntryRepository,
    services::entry_sort,
};
use uuid::Uuid;

/// A member's entries with the derived groupings and counters the
/// portal dashboard shows.
pub async fn list_my_entries(pool: &PgPool, member_id: Uuid) -> Result<MyEntriesResponse> {
    let repo = EntryRepository::new(pool);
    let entries = repo.list_for_member(member_id).await?;

    let by_competition = entry_sort::group_by_competition(&entries);
    let stats = entry_sort::entry_stats(&entries);

    Ok(MyEntriesResponse {
        entries,
        by_competition,
        stats,
    })
}

/// Submit a new entry. The entry window is re-checked here, at the
/// persistence boundary, so a stale client cannot slip past a closed
/// deadline.
pub async fn submit_entry(
    pool: &PgPool,
    member_id: Uuid,
    req: &SubmitEntryRequest,
) -> Result<EntryResponse> {
    let competition = CompetitionRepository::new(pool)
        .find_by_id(req.competition_id)
        .await?;
    if !competition.entries_open(Utc::now()) {
        return Err(StorageError::DeadlinePassed);
    }

    if CategoryRepository::new(pool)
        .find_by_id(req.bjcp_category_id)
        .await
        .is_err()
    {
        return Err(StorageError::Validation("Unknown BJCP category".to_string()));
    }

    let repo = EntryRepository::new(pool);
    let entry = repo.insert(member_id, req).await?;
    repo.find_joined(entry.entry_id).await
}

pub async fn update_entry(
    pool: &PgPool,
    entry_id: Uuid,
    req: &UpdateEntryRequest,
) -> Result<EntryResponse> {
    let repo = EntryRepository::new(pool);
    let existing = ensure_editable(pool, &repo, entry_id).await?;

    if let Some(category_id) = req.bjcp_category_id
        && CategoryRepository::new(pool)
            .find_by_id(category_id)
            .await
            .is_err()
    {
        return Err(StorageError::Validation("Unknown BJCP category".to_string()));
    }

    repo.update(entry_id, &existing, req).await?;
    repo.find_joined(entry_id).await
}

pub async fn delete_entry(pool: &PgPool, entry_id: Uuid) -> Result<()> {
    let repo = EntryRepository::new(pool);
    ensure_editable(pool, &repo, entry_id).await?;
    repo.delete(entry_id).await
}

/// Officer payment toggle; not bound to the entry deadline.
pub async fn set_payment(pool: &PgPool, entry_id: Uuid, paid: bool) -> Result<EntryResponse> {
    let repo = EntryRepository::new(pool);
    repo.set_payment(entry_id, paid).await?;
    repo.find_joined(entry_id).await
}

/// Officer roster for one competition, sorted by the requested column.
pub async fn list_competition_entries(
    pool: &PgPool,
    competition_id: Uuid,
    sort: EntrySortColumn,
    direction: SortDirection,
) -> Result<Vec<EntryRosterRow>> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    let mut rows = EntryRepository::new(pool)
        .list_for_competition(competition_id)
        .await?;
    entry_sort::sort_roster(&mut rows, sort, direction);

    Ok(rows)
}

/// Entries are editable only while their competition is active and the
/// deadline has not passed.
async fn ensure_editable(
    pool: &PgPool,
    repo: &EntryRepository<'_>,
    entry_id: Uuid,
) -> Result<CompetitionEntry> {
    let entry = repo.find_by_id(entry_id).await?;
    let competition = CompetitionRepository::new(pool)
        .find_by_id(entry.competition_id)
        .await?;

    if !competition.entries_open(Utc::now()) {
        return Err(StorageError::DeadlinePassed);
    }

    Ok(entry)
}
