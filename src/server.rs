use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono_tz::Tz;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::display;
use crate::event::{Program, RawEvent};

pub struct App {
    pub program: Program,
    pub config_path: PathBuf,
}

type SharedApp = Arc<App>;

pub fn router(app: App) -> Router {
    Router::new()
        .route("/calendar.ics", get(handle_feed))
        .route("/event/:index", get(handle_single))
        .with_state(Arc::new(app))
}

#[derive(Deserialize)]
struct FeedQuery {
    // Viewer timezone; only affects the JSON rendition.
    tz: Option<String>,
    #[serde(default)]
    json: bool,
}

const ICS_HEADERS: [(&str, &str); 3] = [
    ("content-type", "text/calendar; charset=utf-8"),
    (
        "content-disposition",
        "attachment; filename=\"wedding-events.ics\"",
    ),
    ("cache-control", "no-cache, no-store, must-revalidate"),
];

/// Human-readable rendition of one event, for the JSON variant of the
/// feed endpoint.
#[derive(Debug, Serialize)]
struct DisplayEvent {
    name: String,
    date: String,
    time: String,
    place: String,
    description: String,
}

impl DisplayEvent {
    fn new(raw: &RawEvent, program: &Program, viewer: Tz) -> Self {
        let date = program.event_date(raw).format("%Y-%m-%d").to_string();
        Self {
            name: raw.name.clone(),
            time: display::format_dual(&date, &raw.time, program.source_zone, viewer),
            date: display::date_label(&date),
            place: raw.place.clone().unwrap_or_default(),
            description: raw.description.clone().unwrap_or_default(),
        }
    }
}

async fn handle_feed(State(app): State<SharedApp>, Query(query): Query<FeedQuery>) -> Response {
    let events = match load_events(&app).await {
        Ok(events) => events,
        Err(response) => return response,
    };

    if query.json {
        let viewer = viewer_zone(&app.program, query.tz.as_deref());
        let rendered: Vec<DisplayEvent> = events
            .iter()
            .map(|raw| DisplayEvent::new(raw, &app.program, viewer))
            .collect();
        return Json(rendered).into_response();
    }

    let feed = app.program.feed(&events);
    debug!("serving feed with {} events", feed.events.len());
    (ICS_HEADERS, feed.to_ics().to_string()).into_response()
}

async fn handle_single(State(app): State<SharedApp>, Path(index): Path<String>) -> Response {
    let events = match load_events(&app).await {
        Ok(events) => events,
        Err(response) => return response,
    };

    // The path segment may carry the download suffix, e.g. `/event/0.ics`.
    let Ok(index) = index.trim_end_matches(".ics").parse::<usize>() else {
        return not_found();
    };

    match app.program.feed(&events).single_ics(index) {
        Some(calendar) => (ICS_HEADERS, calendar.to_string()).into_response(),
        None => not_found(),
    }
}

fn viewer_zone(program: &Program, requested: Option<&str>) -> Tz {
    let Some(name) = requested else {
        return program.source_zone;
    };

    match name.parse() {
        Ok(zone) => zone,
        Err(_) => {
            warn!("unknown viewer timezone {name:?}, falling back to the source zone");
            program.source_zone
        }
    }
}

async fn load_events(app: &App) -> Result<Vec<RawEvent>, Response> {
    let site = match config::read_site(&app.config_path).await {
        Ok(site) => site,
        Err(err) => {
            warn!("failed to load site configuration: {err:#}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load site configuration\n",
            )
                .into_response());
        }
    };

    site.events()
        .ok_or_else(|| (StatusCode::NOT_FOUND, "no events found\n").into_response())
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "no such event\n").into_response()
}
