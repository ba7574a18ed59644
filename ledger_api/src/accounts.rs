use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNNAMED_ACCOUNT: &str = "Unnamed account";
pub const UNKNOWN_ACCOUNT_TYPE: &str = "unknown";

// Fields the server might use to identify an account, by order of
// preference.
const ID_FIELDS: [&str; 4] = ["id", "guid", "accountId", "code"];
const LABEL_FIELDS: [&str; 2] = ["name", "label"];

/// One account, as expected by tree widgets.
///
/// Servers are not consistent in how they name fields, so nodes are
/// created via [`AccountNode::from_json`] which accepts the various
/// spellings.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    pub id: String,

    // Short name as displayed to users
    pub label: String,

    // "income", "expense", "asset",... or "unknown" when the server did not
    // tell.
    pub account_type: String,

    #[serde(default)]
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    pub fn new(id: &str, label: &str, account_type: &str) -> Self {
        AccountNode {
            id: id.into(),
            label: label.into(),
            account_type: account_type.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AccountNode>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Build a node from a server record.  This never fails: missing fields
    /// get a default value, and anything which isn't an object is seen as
    /// a record with no field at all.
    pub fn from_json(record: &Value) -> Self {
        AccountNode {
            id: first_field(record, &ID_FIELDS).unwrap_or_else(synthetic_id),
            label: first_field(record, &LABEL_FIELDS)
                .unwrap_or_else(|| UNNAMED_ACCOUNT.to_string()),
            account_type: first_field(record, &["accountType"])
                .unwrap_or_else(|| UNKNOWN_ACCOUNT_TYPE.to_string()),
            children: record
                .get("children")
                .map(normalize_nodes)
                .unwrap_or_default(),
        }
    }
}

/// Convert a list of server records.  Anything but an array results in an
/// empty list.
pub fn normalize_nodes(records: &Value) -> Vec<AccountNode> {
    match records {
        Value::Array(list) => list.iter().map(AccountNode::from_json).collect(),
        _ => Vec::new(),
    }
}

/// The first field from the list that has a meaningful value.  Null, false,
/// zero and the empty string are ignored, other scalars are converted to
/// text.
fn first_field(record: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| record.get(*f))
        .find_map(as_text)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::String(_)
        | Value::Number(_)
        | Value::Bool(false)
        | Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// An identifier for records that have none.  These are random, so two
/// fetches of the same tree will not give the same ids.
pub fn synthetic_id() -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET.get(idx).map_or('0', |c| *c as char)
        })
        .collect()
}
