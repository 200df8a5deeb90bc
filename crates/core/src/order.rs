use serde::{Deserialize, Serialize};

/// Live snapshot of a drink order as the agent assembles it.
///
/// Every field starts out null/empty and fills in as the conversation with
/// the agent progresses. Updates replace the whole snapshot rather than
/// merging into it, so a payload that omits a field clears that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderState {
    pub drink_type: Option<String>,
    pub size: Option<String>,
    pub milk: Option<String>,
    pub extras: Vec<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_payload() {
        let json = r#"{
            "drinkType": "latte",
            "size": "grande",
            "milk": "oat",
            "extras": ["extra shot"],
            "name": "Sam"
        }"#;
        let order: OrderState = serde_json::from_str(json).unwrap();

        assert_eq!(order.drink_type.as_deref(), Some("latte"));
        assert_eq!(order.size.as_deref(), Some("grande"));
        assert_eq!(order.milk.as_deref(), Some("oat"));
        assert_eq!(order.extras, vec!["extra shot".to_string()]);
        assert_eq!(order.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let order: OrderState = serde_json::from_str(r#"{"size": "tall"}"#).unwrap();

        assert_eq!(order.size.as_deref(), Some("tall"));
        assert_eq!(order.drink_type, None);
        assert!(order.extras.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let order = OrderState {
            drink_type: Some("mocha".to_string()),
            ..OrderState::default()
        };
        let json = serde_json::to_string(&order).unwrap();

        assert!(json.contains("\"drinkType\":\"mocha\""));
        assert!(!json.contains("drink_type"));
    }
}
