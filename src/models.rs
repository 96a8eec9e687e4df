use serde::Serialize;
use serde_json::Value;

/// One scheduled train paired with its time at a single station.
///
/// `num_tren` is opaque: the store may hold it as a number or as text, so
/// it is carried through as raw JSON instead of being forced into either.
/// `hora_estacion` is `null` when the row has no such column or the slot
/// is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainTime {
    pub num_tren: Value,
    pub hora_estacion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_train_time_serializes_both_fields() {
        let entry = TrainTime {
            num_tren: json!(7),
            hora_estacion: Some("08:15".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"num_tren": 7, "hora_estacion": "08:15"})
        );
    }

    #[test]
    fn test_missing_time_serializes_as_null() {
        let entry = TrainTime {
            num_tren: json!("A12"),
            hora_estacion: None,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"num_tren": "A12", "hora_estacion": null})
        );
    }
}
