use serde::{Deserialize, Serialize};

/// A geocoordinate in decimal degrees, matching the server's `{lat, lng}`
/// wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A directed walking-path edge between two stops, carrying intermediate
/// coordinates for map rendering. `from_stop_id` and `to_stop_id` reference
/// existing stops; the coordinate list may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePath {
    pub id: i64,
    pub from_stop_id: i64,
    pub to_stop_id: i64,
    pub coordinates: Vec<GeoPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path_wire_format() {
        let json = r#"{
            "id": 1,
            "fromStopId": 1,
            "toStopId": 2,
            "coordinates": [
                {"lat": 52.374, "lng": 4.9126},
                {"lat": 52.3725, "lng": 4.9065}
            ]
        }"#;

        let path: RoutePath = serde_json::from_str(json).expect("parse route path");
        assert_eq!(path.from_stop_id, 1);
        assert_eq!(path.to_stop_id, 2);
        assert_eq!(path.coordinates.len(), 2);
        assert_eq!(path.coordinates[0].lat, 52.374);
    }

    #[test]
    fn test_empty_coordinate_list_is_valid() {
        let json = r#"{"id": 2, "fromStopId": 2, "toStopId": 3, "coordinates": []}"#;
        let path: RoutePath = serde_json::from_str(json).expect("parse route path");
        assert!(path.coordinates.is_empty());
    }
}
