//! Shared sample data.

use serde_json::json;

/// Path list of the worked example used throughout the tests.
///
/// With [`reference_ignore`] applied it yields prop5 `0-0`, prop4 `0-1`,
/// prop1 `0-2` and prop2 `0-3` under the root.
pub fn reference_paths() -> Vec<&'static str> {
    vec![
        "prop1",
        "prop2",
        "prop3",
        "prop2",
        "prop4 --> sub_prop1",
        "prop4 --> sub_prop2",
        "prop4 --> sub_prop3",
        "prop4 --> sub_prop3",
        "prop5 --> sub_prop1 --> sub_sub_prop1",
        "prop5 --> sub_prop1 --> sub_sub_prop2",
        "prop5 --> sub_prop2",
    ]
}

/// Labels hidden in the worked example.
pub fn reference_ignore() -> Vec<String> {
    vec!["prop3".to_string(), "sub_prop3".to_string()]
}

/// A feature collection with flat and nested properties.
pub fn reference_annotation() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "properties": {"name": "glomeruli"},
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
                "properties": {
                    "area": 120,
                    "label": "healthy",
                    "cell_types": {"podocyte": 0.4, "mesangial": 0.6}
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[2, 2], [3, 2], [3, 3], [2, 2]]]},
                "properties": {
                    "area": 80.5,
                    "label": "sclerotic",
                    "cell_types": {"podocyte": 0.1, "mesangial": 0.9}
                }
            }
        ]
    })
}
