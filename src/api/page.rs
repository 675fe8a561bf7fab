//! Server-rendered directory page.

use crate::directory::FilterOptions;

/// Script that drives the result list and map from the three selects.
pub const PAGE_SCRIPT: &str = "/static/js/directory.js";

/// Leaflet stylesheet for the provider map.
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Leaflet library; must load before [`PAGE_SCRIPT`].
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Render the directory page for the given filter choices.
pub fn render_index(options: &FilterOptions) -> String {
    let specialties = select_options(
        "All specialties",
        options.specialties.iter().map(|s| (s.as_str(), s.as_str())),
    );
    let plans: Vec<(String, &str)> = options
        .plans
        .iter()
        .map(|p| (p.id.to_string(), p.name.as_str()))
        .collect();
    let plans = select_options(
        "No plan selected",
        plans.iter().map(|(id, name)| (id.as_str(), *name)),
    );
    let cities = select_options(
        "All cities",
        options.cities.iter().map(|c| (c.as_str(), c.as_str())),
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Provider Directory</title>
  <link rel="stylesheet" href="{LEAFLET_CSS}">
</head>
<body>
  <header>
    <h1>Find a Provider</h1>
  </header>
  <main>
    <form id="filters" onsubmit="return false;">
      <label for="city-select">City</label>
      <select id="city-select" name="city">
{cities}      </select>
      <label for="specialty-select">Specialty</label>
      <select id="specialty-select" name="specialty">
{specialties}      </select>
      <label for="plan-select">Insurance plan</label>
      <select id="plan-select" name="plan_id">
{plans}      </select>
    </form>
    <div id="map" style="height: 420px;"></div>
    <section id="results-list" aria-live="polite"></section>
  </main>
  <script src="{LEAFLET_JS}"></script>
  <script src="{PAGE_SCRIPT}"></script>
</body>
</html>
"#
    )
}

fn select_options<'a>(placeholder: &str, items: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = format!("        <option value=\"\">{}</option>\n", escape_html(placeholder));
    for (value, label) in items {
        out.push_str(&format!(
            "        <option value=\"{}\">{}</option>\n",
            escape_html(value),
            escape_html(label)
        ));
    }
    out
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
