use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::list_active_competitions,
        features::competitions::handlers::list_competitions_with_stats,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
        features::categories::handlers::list_categories,
        features::categories::handlers::list_grouped_categories,
        features::entries::handlers::list_my_entries,
        features::entries::handlers::submit_entry,
        features::entries::handlers::update_entry,
        features::entries::handlers::delete_entry,
        features::entries::handlers::update_payment,
        features::entries::handlers::list_competition_entries,
        features::judges::handlers::list_judges,
        features::judges::handlers::assign_judge,
        features::judges::handlers::remove_judge,
        features::judging::handlers::start_session,
        features::judging::handlers::get_session,
        features::judging::handlers::set_current_entry,
        features::judging::handlers::save_results,
        features::judging::handlers::end_session,
        features::members::handlers::list_members,
        features::results::handlers::list_results,
        features::results::handlers::publish_results,
    ),
    components(
        schemas(
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::UpdateCompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::CompetitionStatsResponse,
            storage::dto::category::CategoryGroup,
            storage::dto::category::SubcategoryInfo,
            storage::dto::common::PaginationMeta,
            storage::dto::common::SortDirection,
            storage::dto::entry::SubmitEntryRequest,
            storage::dto::entry::UpdateEntryRequest,
            storage::dto::entry::UpdatePaymentRequest,
            storage::dto::entry::CompetitionInfo,
            storage::dto::entry::CategoryInfo,
            storage::dto::entry::ResultInfo,
            storage::dto::entry::EntryResponse,
            storage::dto::entry::EntryStats,
            storage::dto::entry::CompetitionEntryGroup,
            storage::dto::entry::MyEntriesResponse,
            storage::dto::entry::EntryRosterRow,
            storage::dto::entry::EntrySortColumn,
            storage::dto::judge::AssignJudgeRequest,
            storage::dto::judge::JudgeInfo,
            storage::dto::judge::JudgeCompetitionInfo,
            storage::dto::judge::JudgeAssignmentResponse,
            storage::dto::judging::StartSessionRequest,
            storage::dto::judging::SetCurrentEntryRequest,
            storage::dto::judging::SaveScoresRequest,
            storage::dto::judging::ScoredEntry,
            storage::dto::judging::JudgingProgress,
            storage::dto::judging::JudgingSessionState,
            storage::dto::result::PublishResultRow,
            storage::dto::result::PublishResultsRequest,
            storage::dto::result::ResultRow,
            storage::models::Competition,
            storage::models::competition::CompetitionStatus,
            storage::models::CompetitionEntry,
            storage::models::BjcpCategory,
            storage::models::JudgeAssignment,
            storage::models::JudgingSession,
            storage::models::CompetitionResult,
            storage::models::Member,
        )
    ),
    tags(
        (name = "competitions", description = "Competition directory and officer management"),
        (name = "categories", description = "BJCP style reference data"),
        (name = "entries", description = "Member entries and the officer roster"),
        (name = "judges", description = "Judge assignments"),
        (name = "judging", description = "Judging sessions and scoresheets"),
        (name = "members", description = "Member directory"),
        (name = "results", description = "Results publication"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting homebrew competition API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    let app_state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(features::competitions::routes::routes(api_keys.clone()))
        .merge(features::categories::routes::routes())
        .merge(features::entries::routes::routes(api_keys.clone()))
        .merge(features::judges::routes::routes(api_keys.clone()))
        .merge(features::judging::routes::routes())
        .merge(features::members::routes::routes(api_keys.clone()))
        .merge(features::results::routes::routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
