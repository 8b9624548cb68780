use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use folioview_broker::AccountsListing;
use folioview_core::{
    constants::HISTORY_TABLE_DISPLAY_ROWS,
    dashboard::{build_dashboard_from_payloads, ChartData, ChartScale, CommitOutcome, DashboardView},
    portfolio::{metrics::PortfolioMetrics, performance::HistoryRow, snapshot::Component},
    utils::time_utils::today,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::BearerToken,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectRequest {
    account: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectResponse {
    account: String,
    generation: u64,
    view: DashboardView,
}

#[derive(Deserialize)]
struct CurrentQuery {
    scale: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentResponse {
    account: Option<String>,
    portfolio_chart: ChartData,
    components_chart: ChartData,
    composition: Vec<Component>,
    history: Vec<HistoryRow>,
    history_truncated: bool,
    metrics: PortfolioMetrics,
    degenerate: bool,
}

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
) -> ApiResult<Json<AccountsListing>> {
    let client = state.broker.for_token(token.as_str())?;
    let listing = client.fetch_overview().await?;
    tracing::info!("Loaded {} accounts", listing.accounts.len());
    Ok(Json(listing))
}

async fn select_account(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Json(body): Json<SelectRequest>,
) -> ApiResult<Json<SelectResponse>> {
    let account = body.account.trim().to_string();
    if account.is_empty() {
        return Err(ApiError::BadRequest("account is required".to_string()));
    }
    let client = state.broker.for_token(token.as_str())?;
    let key = token.session_key();

    let generation = state.sessions.begin_selection(key, &account).await;
    tracing::debug!("{:?} selecting {} as {}", key, account, generation);

    let bundle = client.fetch_account_bundle(&account).await?;
    let (snapshot, history) = bundle.payloads()?;
    let view = build_dashboard_from_payloads(&snapshot, &history, today(), &state.dashboard_settings);

    match state.sessions.commit(key, generation, view.clone()).await {
        None => {
            tracing::info!("Session expired before {} for {} completed", generation, account);
            Err(ApiError::SessionExpired)
        }
        Some(CommitOutcome::Applied { generation }) => Ok(Json(SelectResponse {
            account,
            generation: generation.value(),
            view,
        })),
        Some(CommitOutcome::Stale { generation, latest }) => {
            tracing::info!("Discarding {} for {}: superseded by {}", generation, account, latest);
            Err(ApiError::Superseded {
                generation: generation.value(),
                latest: latest.value(),
            })
        }
    }
}

async fn current_dashboard(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Query(query): Query<CurrentQuery>,
) -> ApiResult<Json<CurrentResponse>> {
    let scale = match query.scale.as_deref() {
        Some(raw) => raw
            .parse::<ChartScale>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ChartScale::default(),
    };

    let rendered = state
        .sessions
        .render(token.session_key(), scale)
        .await
        .ok_or(ApiError::NotFound)?;
    let view = rendered.view;

    Ok(Json(CurrentResponse {
        account: rendered.account,
        portfolio_chart: rendered.portfolio_chart,
        components_chart: rendered.components_chart,
        history: view.recent_history().to_vec(),
        history_truncated: view.history.is_truncated(HISTORY_TABLE_DISPLAY_ROWS),
        composition: view.composition,
        metrics: view.metrics,
        degenerate: view.degenerate,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/accounts", get(list_accounts))
        .route("/dashboard/select", post(select_account))
        .route("/dashboard/current", get(current_dashboard))
}
