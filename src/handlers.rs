use crate::client::is_safe_trip_id;
use crate::dashboard::{build_dashboard, Dashboard};
use crate::errors::AppError;
use crate::form::{FormErrors, TripForm, SUBMIT_FAILED};
use crate::geometry::MapLayers;
use crate::models::Trip;
use crate::state::AppState;
use crate::summary::SummaryState;
use crate::ui::{render_dashboard, render_home, render_missing_trip_id, render_summary, render_trip_form};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{error, info, warn};

pub async fn home() -> Html<String> {
    Html(render_home())
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn new_trip_form() -> Html<String> {
    Html(render_trip_form(&TripForm::with_defaults(), &FormErrors::default(), None))
}

pub async fn submit_trip(State(state): State<AppState>, Form(form): Form<TripForm>) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            info!(?errors, "trip form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_trip_form(&form, &errors, None)),
            )
                .into_response();
        }
    };

    info!(?payload, "submitting trip");
    match state.client.create_trip(&payload).await {
        Ok(trip) => Redirect::to(&created_trip_location(&trip)).into_response(),
        Err(err) => {
            error!("failed to create trip: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Html(render_trip_form(&form, &FormErrors::default(), Some(SUBMIT_FAILED))),
            )
                .into_response()
        }
    }
}

fn created_trip_location(trip: &Trip) -> String {
    match trip.identifier().map(ToString::to_string) {
        Some(id) if is_safe_trip_id(&id) => format!("/trips/{id}"),
        other => {
            warn!(id = ?other, "created trip has no usable id, showing the dashboard");
            "/dashboard".to_string()
        }
    }
}

pub async fn missing_trip_id() -> (StatusCode, Html<String>) {
    (StatusCode::BAD_REQUEST, Html(render_missing_trip_id()))
}

pub async fn trip_summary(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> (StatusCode, Html<String>) {
    let summary = SummaryState::load(&state.client, &trip_id).await;
    let status = match summary {
        SummaryState::Error(_) => StatusCode::BAD_GATEWAY,
        SummaryState::Loading | SummaryState::Success(_) => StatusCode::OK,
    };
    (status, Html(render_summary(&summary, &state.charts)))
}

pub async fn trip_map(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<MapLayers>, AppError> {
    let trip = state.client.get_trip(&trip_id).await?;
    let route = trip
        .route
        .ok_or_else(|| AppError::not_found("route information is missing for this trip"))?;
    Ok(Json(MapLayers::from_route(&route)))
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let dashboard = load_dashboard(&state).await;
    Html(render_dashboard(&dashboard, &state.charts))
}

pub async fn dashboard_data(State(state): State<AppState>) -> Json<Dashboard> {
    Json(load_dashboard(&state).await)
}

/// A failed listing degrades to an empty dashboard instead of an error page.
async fn load_dashboard(state: &AppState) -> Dashboard {
    let trips = state.client.list_trips().await.unwrap_or_else(|err| {
        warn!("error fetching trips, showing an empty dashboard: {err}");
        Vec::new()
    });
    build_dashboard(&trips)
}
