use serde::Serialize;

use super::{CircleMarker, WorldMap};
use crate::error::Result;

const LEAFLET_VERSION: &str = "1.9.4";
const MARKERCLUSTER_VERSION: &str = "1.5.3";

/// Marker payload handed to the page script
#[derive(Serialize)]
struct MarkerJs<'a> {
    lat: f64,
    lng: f64,
    radius: f64,
    popup: &'a str,
    fill: bool,
    #[serde(rename = "fillOpacity")]
    fill_opacity: f64,
}

impl<'a> From<&'a CircleMarker> for MarkerJs<'a> {
    fn from(marker: &'a CircleMarker) -> Self {
        Self {
            lat: marker.location.latitude,
            lng: marker.location.longitude,
            radius: marker.radius,
            popup: &marker.popup,
            fill: marker.fill,
            fill_opacity: marker.fill_opacity,
        }
    }
}

/// Escape text for an HTML context
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that is safe to inline inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_page(map: &WorldMap) -> Result<String> {
    let markers: Vec<MarkerJs> = map.markers.iter().map(MarkerJs::from).collect();
    let leaflet = format!("https://unpkg.com/leaflet@{}/dist", LEAFLET_VERSION);
    let cluster = format!(
        "https://unpkg.com/leaflet.markercluster@{}/dist",
        MARKERCLUSTER_VERSION
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Average wine price per country</title>
<link rel="stylesheet" href="{leaflet}/leaflet.css">
<link rel="stylesheet" href="{cluster}/MarkerCluster.css">
<link rel="stylesheet" href="{cluster}/MarkerCluster.Default.css">
<script src="{leaflet}/leaflet.js"></script>
<script src="{cluster}/leaflet.markercluster.js"></script>
<style>html, body, #map {{ width: 100%; height: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map", {{ worldCopyJump: true }}).setView([20, 0], 2);
L.tileLayer({tiles_url}, {{ attribution: {attribution}, maxZoom: 18 }}).addTo(map);
var cluster = L.markerClusterGroup().addTo(map);
var markers = {markers};
markers.forEach(function (m) {{
  L.circleMarker([m.lat, m.lng], {{ radius: m.radius, fill: m.fill, fillOpacity: m.fillOpacity }})
    .bindPopup(m.popup)
    .addTo(cluster);
}});
</script>
</body>
</html>
"#,
        leaflet = leaflet,
        cluster = cluster,
        tiles_url = script_json(map.tiles.url())?,
        attribution = script_json(map.tiles.attribution())?,
        markers = script_json(&markers)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::map::Tiles;

    fn marker(popup: &str) -> CircleMarker {
        CircleMarker {
            location: Coordinates::new(48.864716, 2.349014),
            label: "France".to_string(),
            price: 52,
            radius: 20.0,
            popup: popup.to_string(),
            fill: true,
            fill_opacity: 0.0,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Côte d'Or & <Rhône>"), "Côte d&#39;Or &amp; &lt;Rhône&gt;");
    }

    #[test]
    fn test_page_contains_cluster_and_markers() {
        let map = WorldMap {
            tiles: Tiles::CartoDbPositron,
            markers: vec![marker("Country: France<br>Average price: 52 USD<br>")],
        };
        let page = render_page(&map).unwrap();

        assert!(page.contains("L.markerClusterGroup()"));
        assert!(page.contains("basemaps.cartocdn.com/light_all"));
        assert!(page.contains("\"lat\":48.864716"));
        assert!(page.contains("\"fillOpacity\":0.0"));
        assert!(page.contains("Average price: 52 USD"));
    }

    #[test]
    fn test_script_cannot_be_closed_by_data() {
        let map = WorldMap {
            tiles: Tiles::OpenStreetMap,
            markers: vec![marker("</script><script>alert(1)</script>")],
        };
        let page = render_page(&map).unwrap();
        assert_eq!(page.matches("</script>").count(), 3);
        assert!(page.contains("<\\/script>"));
    }
}
