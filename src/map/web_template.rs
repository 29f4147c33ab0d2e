use crate::domain::Position;
use crate::map::DISPLAY_PRECISION;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Self-contained web page showing one marker. The coordinates are baked in, moving the
/// marker means generating a new document.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDocument<'a> {
    pub center: Position,
    pub marker: Position,
    pub zoom: u8,
    pub tile_url: &'a str,
    pub attribution: &'a str,
}

impl MapDocument<'_> {
    pub fn to_html(&self) -> String {
        let popup = format!(
            "{:.prec$}, {:.prec$}",
            self.marker.latitude(),
            self.marker.longitude(),
            prec = DISPLAY_PRECISION
        );

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
  <link rel="stylesheet" href="{css}" />
  <style>
    html, body, #map {{ height: 100%; margin: 0; padding: 0; }}
    #placeholder {{ display: none; height: 100%; align-items: center; justify-content: center; font-family: sans-serif; background: #eee; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <div id="placeholder">Mapa no disponible · {popup}</div>
  <script>
    function showPlaceholder() {{
      document.getElementById('map').style.display = 'none';
      document.getElementById('placeholder').style.display = 'flex';
    }}
  </script>
  <script src="{js}" onerror="showPlaceholder()"></script>
  <script>
    try {{
      var map = L.map('map').setView([{center_lat}, {center_lon}], {zoom});
      L.tileLayer({tile_url}, {{ maxZoom: 19, attribution: {attribution} }}).addTo(map);
      L.marker([{marker_lat}, {marker_lon}]).addTo(map).bindPopup({popup_js}).openPopup();
    }} catch (e) {{
      showPlaceholder();
    }}
  </script>
</body>
</html>
"#,
            css = LEAFLET_CSS,
            js = LEAFLET_JS,
            popup = popup,
            center_lat = self.center.latitude(),
            center_lon = self.center.longitude(),
            zoom = self.zoom,
            tile_url = js_string(self.tile_url),
            attribution = js_string(self.attribution),
            marker_lat = self.marker.latitude(),
            marker_lon = self.marker.longitude(),
            popup_js = js_string(&popup),
        )
    }
}

/// JSON is valid JavaScript, `</` is broken up so a value can't close the script element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string().replace("</", "<\\/")
}
