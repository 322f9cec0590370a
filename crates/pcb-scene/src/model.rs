use serde::{Deserialize, Serialize};

/// A board and its mounted components, as parsed from a board document.
/// Immutable once loaded; scene rebuilds always start from this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub name: String,
    pub dimensions: Dimensions,
    pub components: Vec<Component>,
}

/// Width/height/thickness in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Location label, e.g. "C1".
    pub location: String,
    /// Free-form category string, matched against the color table.
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Degrees, display-only.
    #[serde(default)]
    pub rotation: i32,
    /// Mounting side. Only the exact string "Top" counts as top; anything
    /// else mirrors below the board plane.
    pub face: String,
    #[serde(default, rename = "kdtecPN")]
    pub kdtec_pn: String,
    #[serde(default, rename = "customerPN")]
    pub customer_pn: String,
    #[serde(default, rename = "makerPN")]
    pub maker_pn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub maker_name: String,
    #[serde(default)]
    pub process: String,
    pub dimensions: Dimensions,
}

impl Component {
    pub fn is_top(&self) -> bool {
        self.face == "Top"
    }

    /// Sign applied to z when placing this component's primitive.
    pub fn face_sign(&self) -> f64 {
        if self.is_top() {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc = r#"{
            "name": "demo",
            "dimensions": {"width": 50.0, "height": 30.0, "thickness": 1.0},
            "components": [{
                "location": "C1",
                "type": "Capacitor",
                "x": 10.0, "y": 10.0, "z": 0.5,
                "rotation": 0,
                "face": "Top",
                "kdtecPN": "K-100",
                "customerPN": "CU-200",
                "makerPN": "M-300",
                "description": "100nF 0603",
                "makerName": "Murata",
                "process": "SMT",
                "dimensions": {"width": 1.0, "height": 1.0, "thickness": 1.0}
            }]
        }"#;
        let board: Board = serde_json::from_str(doc).unwrap();
        assert_eq!(board.name, "demo");
        assert_eq!(board.components.len(), 1);
        let c = &board.components[0];
        assert_eq!(c.location, "C1");
        assert_eq!(c.kind, "Capacitor");
        assert_eq!(c.kdtec_pn, "K-100");
        assert_eq!(c.maker_name, "Murata");
        assert_eq!(c.z, 0.5);
    }

    #[test]
    fn test_part_number_fields_default_when_absent() {
        let doc = r#"{
            "name": "bare",
            "dimensions": {"width": 10.0, "height": 10.0, "thickness": 1.0},
            "components": [{
                "location": "R1",
                "type": "Resistor",
                "x": 1.0, "y": 2.0, "z": 0.3,
                "face": "Bottom",
                "dimensions": {"width": 1.0, "height": 0.5, "thickness": 0.4}
            }]
        }"#;
        let board: Board = serde_json::from_str(doc).unwrap();
        let c = &board.components[0];
        assert_eq!(c.rotation, 0);
        assert_eq!(c.kdtec_pn, "");
        assert_eq!(c.description, "");
        assert_eq!(c.process, "");
    }

    #[test]
    fn test_face_sign() {
        let doc = r#"{
            "location": "U1", "type": "IC",
            "x": 0.0, "y": 0.0, "z": 1.0, "face": "Top",
            "dimensions": {"width": 1.0, "height": 1.0, "thickness": 1.0}
        }"#;
        let mut c: Component = serde_json::from_str(doc).unwrap();
        assert_eq!(c.face_sign(), 1.0);
        c.face = "Bottom".to_string();
        assert_eq!(c.face_sign(), -1.0);
        // Anything that is not exactly "Top" mirrors downward.
        c.face = "top".to_string();
        assert_eq!(c.face_sign(), -1.0);
        c.face = "Side".to_string();
        assert_eq!(c.face_sign(), -1.0);
    }

    #[test]
    fn test_round_trip() {
        let board = Board {
            name: "rt".to_string(),
            dimensions: Dimensions {
                width: 20.0,
                height: 10.0,
                thickness: 1.6,
            },
            components: vec![],
        };
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
