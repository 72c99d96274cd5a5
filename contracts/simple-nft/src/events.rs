//! NEP-171 event logs (`EVENT_JSON:` prefix, NEP-297 envelope).

use near_sdk::serde_json::{self, Map, Value, json};
use near_sdk::{AccountId, env};

const STANDARD: &str = "nep171";
const VERSION: &str = "1.0.0";
const PREFIX: &str = "EVENT_JSON:";

struct Nep171Event {
    event: &'static str,
    fields: Map<String, Value>,
}

impl Nep171Event {
    fn new(event: &'static str) -> Self {
        Self {
            event,
            fields: Map::new(),
        }
    }

    fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    fn field_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, Value::String(v.to_string())),
            None => self,
        }
    }

    fn emit(self) {
        let envelope = json!({
            "standard": STANDARD,
            "version": VERSION,
            "event": self.event,
            "data": [Value::Object(self.fields)],
        });
        env::log_str(&format!(
            "{PREFIX}{}",
            serde_json::to_string(&envelope).unwrap_or_default()
        ));
    }
}

pub fn emit_mint(owner_id: &AccountId, token_ids: &[String]) {
    Nep171Event::new("nft_mint")
        .field("owner_id", json!(owner_id))
        .field("token_ids", json!(token_ids))
        .emit();
}

pub fn emit_transfer(
    old_owner_id: &AccountId,
    new_owner_id: &AccountId,
    token_id: &str,
    authorized_id: Option<&AccountId>,
    memo: Option<&str>,
) {
    let authorized = authorized_id.map(|a| a.to_string());
    Nep171Event::new("nft_transfer")
        .field("old_owner_id", json!(old_owner_id))
        .field("new_owner_id", json!(new_owner_id))
        .field("token_ids", json!([token_id]))
        .field_opt("authorized_id", authorized.as_deref())
        .field_opt("memo", memo)
        .emit();
}
