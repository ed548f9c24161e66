use crate::chart::Charts;
use crate::dashboard::Dashboard;
use crate::form::{FormErrors, TripForm};
use crate::geometry::MapLayers;
use crate::models::LogEntry;
use crate::summary::{RouteSummary, SummaryState, TripSummary, NOT_AVAILABLE};

pub const ROUTE_MISSING_MESSAGE: &str = "Route information is missing for this trip.";
pub const NO_MAP_POINTS_MESSAGE: &str = "No valid locations to display on the map.";
pub const NO_LOGS_MESSAGE: &str = "No log entries available.";
pub const NO_CHART_DATA_MESSAGE: &str = "No data available.";
pub const NO_RECENT_ACTIVITY_MESSAGE: &str = "No recent activity found.";
pub const MISSING_TRIP_ID_MESSAGE: &str = "Trip ID is missing.";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Nav {
    Home,
    NewTrip,
    Dashboard,
    None,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render_home() -> String {
    page("SafariLog Pro", Nav::Home, HOME_HTML, "", "")
}

pub fn render_missing_trip_id() -> String {
    let content = format!(
        r#"<p class="status" data-type="error">{MISSING_TRIP_ID_MESSAGE}</p>"#
    );
    page("Trip Summary", Nav::None, &content, "", "")
}

pub fn render_trip_form(form: &TripForm, errors: &FormErrors, status: Option<&str>) -> String {
    let mut content = String::from(r#"<h1>Plan New Trip</h1><form class="card form" method="post" action="/new-trip" novalidate>"#);

    let pickers = [
        ("current", "Current Location", &form.current_lat, &form.current_lng, errors.current_location),
        ("pickup", "Pickup Location", &form.pickup_lat, &form.pickup_lng, errors.pickup_location),
        ("dropoff", "Dropoff Location", &form.dropoff_lat, &form.dropoff_lng, errors.dropoff_location),
    ];
    for (name, title, lat, lng, error) in pickers {
        content.push_str(&format!(
            r#"<section class="form-section"><h2>{title}</h2><div class="map picker" data-picker="{name}"></div><div class="coords"><label>Latitude <input name="{name}_lat" value="{lat}" inputmode="decimal" /></label><label>Longitude <input name="{name}_lng" value="{lng}" inputmode="decimal" /></label></div>{error}</section>"#,
            lat = escape_html(lat),
            lng = escape_html(lng),
            error = field_error(error),
        ));
    }

    content.push_str(&format!(
        r#"<section class="form-section"><h2>Current Cycle Hours</h2><input class="input" type="number" step="0.5" min="0" max="70" name="cycle_hours" value="{hours}" placeholder="Enter current cycle hours" />{error}</section>"#,
        hours = escape_html(&form.cycle_hours),
        error = field_error(errors.cycle_hours),
    ));

    if let Some(status) = status {
        content.push_str(&format!(
            r#"<div class="status" data-type="error">{}</div>"#,
            escape_html(status)
        ));
    }
    content.push_str(r#"<div class="actions"><button class="btn-primary" type="submit">Create Trip</button></div></form>"#);

    page("Plan New Trip", Nav::NewTrip, &content, LEAFLET_HEAD, PICKER_SCRIPT)
}

fn field_error(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape_html(message)))
        .unwrap_or_default()
}

pub fn render_summary(state: &SummaryState, charts: &Charts) -> String {
    let mut content = String::from("<h1>Trip Summary</h1>");
    let mut script = "";

    match state {
        SummaryState::Loading => content.push_str(r#"<p class="status">Loading trip details...</p>"#),
        SummaryState::Error(message) => {
            content.push_str(&format!(
                r#"<p class="status" data-type="error">{}</p>"#,
                escape_html(message)
            ));
        }
        SummaryState::Success(summary) => {
            script = render_success(&mut content, summary, charts);
        }
    }

    page("Trip Summary", Nav::None, &content, LEAFLET_HEAD, script)
}

/// Writes the route and log sections; returns the script the page needs.
fn render_success(content: &mut String, summary: &TripSummary, charts: &Charts) -> &'static str {
    let script = match &summary.route {
        None => {
            content.push_str(&format!(r#"<div class="placeholder">{ROUTE_MISSING_MESSAGE}</div>"#));
            ""
        }
        Some(route) => render_route(content, route),
    };

    content.push_str("<h2>Electronic Log Sheets</h2>");
    if summary.logs().is_empty() {
        content.push_str(&format!(r#"<div class="placeholder">{NO_LOGS_MESSAGE}</div>"#));
    }
    for entry in summary.logs() {
        content.push_str(&render_log_sheet(entry, charts));
    }

    script
}

fn render_route(content: &mut String, route: &RouteSummary) -> &'static str {
    let script = if route.layers.is_empty() {
        content.push_str(&format!(r#"<div class="placeholder">{NO_MAP_POINTS_MESSAGE}</div>"#));
        ""
    } else {
        content.push_str(&format!(
            r#"<div id="trip-map" class="map"></div><script id="map-data" type="application/json">{}</script>"#,
            map_json(&route.layers)
        ));
        MAP_SCRIPT
    };

    content.push_str(&format!(
        r#"<div class="card route-info"><p><strong>Distance:</strong> {distance}</p><p><strong>Estimated Time:</strong> {duration}</p><p><strong>Stops:</strong> {stops} (Fuel &amp; Rest)</p></div>"#,
        distance = escape_html(&route.distance),
        duration = escape_html(&route.duration),
        stops = route.stop_count,
    ));
    script
}

/// Layers as JSON safe to inline inside a `<script>` element.
pub fn map_json(layers: &MapLayers) -> String {
    serde_json::to_string(layers)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

pub fn render_log_sheet(entry: &LogEntry, charts: &Charts) -> String {
    let text = |value: &Option<String>| escape_html(value.as_deref().unwrap_or(NOT_AVAILABLE));
    let status = entry.status.map(|status| status.as_str()).unwrap_or(NOT_AVAILABLE);

    format!(
        r#"<article class="card log-sheet"><h3>{date}</h3>{chart}<p><strong>Start Time:</strong> {start}</p><p><strong>End Time:</strong> {end}</p><p><strong>Status:</strong> {status}</p><p><strong>Location:</strong> {location}</p><p><strong>Remarks:</strong> {remarks}</p></article>"#,
        date = text(&entry.date),
        chart = charts.duty_status_line(entry),
        start = text(&entry.start_time),
        end = text(&entry.end_time),
        location = text(&entry.location),
        remarks = text(&entry.remarks),
    )
}

pub fn render_dashboard(dashboard: &Dashboard, charts: &Charts) -> String {
    let mut content = format!(
        r#"<h1>Dashboard</h1><section class="panel"><div class="stat"><span class="label">Total Trips</span><span class="value" id="total-trips">{total}</span></div><div class="stat"><span class="label">Active Trips</span><span class="value active" id="active-trips">{active}</span></div><div class="stat"><span class="label">Completed Trips</span><span class="value completed" id="completed-trips">{completed}</span></div></section>"#,
        total = dashboard.total_trips,
        active = dashboard.active_trips,
        completed = dashboard.completed_trips,
    );

    content.push_str(r#"<section class="card"><h2>Monthly Trips Overview</h2>"#);
    if dashboard.monthly.is_empty() {
        content.push_str(&format!("<p>{NO_CHART_DATA_MESSAGE}</p>"));
    } else {
        let bars: Vec<(String, u32)> = dashboard
            .monthly
            .iter()
            .map(|month| (month.month.clone(), month.trips))
            .collect();
        content.push_str(&charts.monthly_bars("Monthly Trips Created", &bars));
    }
    content.push_str("</section>");

    content.push_str(r#"<section class="card"><h2>Recent Activity</h2><div class="activity">"#);
    if dashboard.recent.is_empty() {
        content.push_str(&format!("<p>{NO_RECENT_ACTIVITY_MESSAGE}</p>"));
    }
    for trip in &dashboard.recent {
        let text = |value: &Option<String>| escape_html(value.as_deref().unwrap_or(NOT_AVAILABLE));
        content.push_str(&format!(
            r#"<div class="activity-row"><div><p class="strong">Trip ID: {id}</p><p>From: {from}</p><p>To: {to}</p></div><p>{date}</p></div>"#,
            id = text(&trip.id),
            from = text(&trip.pickup_location),
            to = text(&trip.dropoff_location),
            date = text(&trip.created_on),
        ));
    }
    content.push_str("</div></section>");

    page("Dashboard", Nav::Dashboard, &content, "", "")
}

fn page(title: &str, active: Nav, content: &str, head: &str, script: &str) -> String {
    let link = |nav: Nav, href: &str, label: &str| {
        let class = if nav == active { r#" class="active""# } else { "" };
        format!(r#"<a href="{href}"{class}>{label}</a>"#)
    };
    let nav = [
        link(Nav::Home, "/", "Home"),
        link(Nav::NewTrip, "/new-trip", "New Trip"),
        link(Nav::Dashboard, "/dashboard", "Dashboard"),
    ]
    .concat();

    LAYOUT_HTML
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{HEAD}}", head)
        .replace("{{NAV}}", &nav)
        .replace("{{SCRIPT}}", script)
        .replace("{{CONTENT}}", content)
}

const LEAFLET_HEAD: &str = r#"<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>"#;

const HOME_HTML: &str = r#"<section class="card hero">
      <h1>Welcome to SafariLog Pro</h1>
      <p class="subtitle">Plan your routes, manage your hours, and generate ELD logs with ease.
        Start your journey with professional trip management today.</p>
      <a class="btn-primary" href="/new-trip">Start New Trip &rarr;</a>
    </section>"#;

const MAP_SCRIPT: &str = r#"<script>
    const mapData = JSON.parse(document.getElementById('map-data').textContent);
    if (mapData && window.L) {
      const map = L.map('trip-map').setView(mapData.center, mapData.zoom);
      L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
      }).addTo(map);

      if (mapData.show_line) {
        L.polyline(mapData.path, { color: 'blue' }).addTo(map);
      }

      mapData.markers.forEach((marker) => {
        const popup = document.createElement('div');
        popup.textContent = marker.label;
        if (marker.detail) {
          popup.appendChild(document.createElement('br'));
          popup.appendChild(document.createTextNode(marker.detail));
        }
        L.marker(marker.position).addTo(map).bindPopup(popup);
      });
    }
  </script>"#;

const PICKER_SCRIPT: &str = r#"<script>
    const fallbackCenter = [1.2921, 36.8219];

    document.querySelectorAll('[data-picker]').forEach((el) => {
      if (!window.L) {
        el.remove();
        return;
      }
      const name = el.dataset.picker;
      const latInput = document.querySelector(`input[name="${name}_lat"]`);
      const lngInput = document.querySelector(`input[name="${name}_lng"]`);
      const start = [parseFloat(latInput.value), parseFloat(lngInput.value)];
      const center = Number.isFinite(start[0]) && Number.isFinite(start[1]) ? start : fallbackCenter;

      const map = L.map(el, { scrollWheelZoom: false }).setView(center, 13);
      L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
      }).addTo(map);
      const marker = L.marker(center).addTo(map);

      map.on('click', (event) => {
        marker.setLatLng(event.latlng);
        latInput.value = event.latlng.lat.toFixed(6);
        lngInput.value = event.latlng.lng.toFixed(6);
      });
    });
  </script>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · SafariLog Pro</title>
  {{HEAD}}
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f6fb;
      --bg-2: #dbe7f7;
      --ink: #1f2a37;
      --accent: #f97316;
      --accent-2: #1e3a8a;
      --ok: #16a34a;
      --warn: #ca8a04;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(30, 58, 138, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef2f9 60%, #f8fafc 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 16px 28px;
      background: var(--accent-2);
      color: white;
    }

    nav .brand {
      font-weight: 600;
      font-size: 1.2rem;
    }

    nav a {
      color: rgba(255, 255, 255, 0.8);
      text-decoration: none;
      margin-left: 18px;
      font-weight: 500;
    }

    nav a.active {
      color: white;
      border-bottom: 2px solid var(--accent);
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 32px 18px 48px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      color: var(--accent-2);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      color: #5b6472;
      font-size: 1.05rem;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .hero {
      text-align: center;
      max-width: 720px;
      margin: 8vh auto 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(30, 58, 138, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #6b7280;
    }

    .stat .value {
      font-size: 1.9rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.active {
      color: var(--ok);
    }

    .stat .value.completed {
      color: var(--warn);
    }

    .map {
      height: 384px;
      width: 100%;
      border-radius: 16px;
      overflow: hidden;
    }

    .map.picker {
      height: 300px;
    }

    .placeholder {
      padding: 24px;
      border-radius: 16px;
      border: 1px dashed rgba(30, 58, 138, 0.3);
      color: #5b6472;
      text-align: center;
    }

    .chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-title {
      font-size: 13px;
      font-weight: 600;
      fill: var(--ink);
    }

    .chart-grid {
      stroke: rgba(30, 58, 138, 0.12);
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: #1d4ed8;
      stroke-width: 2;
    }

    .chart-label {
      fill: #6b7280;
      font-size: 11px;
    }

    .log-sheet h3 {
      margin-top: 0;
    }

    .activity-row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 14px 0;
      border-bottom: 1px solid #e5e7eb;
    }

    .activity-row p {
      margin: 2px 0;
      color: #4b5563;
    }

    .activity-row .strong {
      color: var(--ink);
      font-weight: 600;
    }

    .form {
      display: grid;
      gap: 0;
      padding: 0;
    }

    .form-section {
      padding: 24px;
      border-bottom: 1px solid #e5e7eb;
    }

    .coords {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      margin-top: 12px;
    }

    input {
      border: 1px solid #cbd5e1;
      border-radius: 10px;
      padding: 10px 12px;
      font: inherit;
    }

    .field-error {
      margin: 6px 0 0;
      color: #dc2626;
      font-size: 0.9rem;
    }

    .actions {
      display: flex;
      justify-content: flex-end;
      padding: 24px;
    }

    .btn-primary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 28px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      display: inline-flex;
      box-shadow: 0 10px 24px rgba(249, 115, 22, 0.3);
    }

    .status {
      font-size: 1rem;
      color: #5b6472;
    }

    .status[data-type="error"] {
      color: #c63b2b;
      padding: 0 24px;
    }
  </style>
</head>
<body>
  <nav>
    <span class="brand">SafariLog Pro</span>
    <div>{{NAV}}</div>
  </nav>
  <main>
    {{CONTENT}}
  </main>
  {{SCRIPT}}
</body>
</html>
"#;
