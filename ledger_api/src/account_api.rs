//! Access to the accounts of the backend.
//!
//! Unlike the request [`Client`], these functions never fail: errors are
//! logged and an empty result is returned, so that a view can always be
//! displayed.

use crate::accounts::{normalize_nodes, AccountNode};
use crate::classify::{ClassifiedAccount, Classifier};
use crate::errors::Result;
use crate::request::{Body, Client, HttpTransport, Transport};
use crate::settings::ClientSettings;
use crate::statistics::StatisticsQuery;
use crate::trees::AccountTree;
use serde::Serialize;
use serde_json::Value;

pub const ACCOUNT_TREE_PATH: &str = "/account/tree";
pub const ACCOUNT_STATISTICS_PATH: &str = "/account/statistics";

/// The whole tree, and the accounts classified as income or expense.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTreeData {
    pub all_accounts: Vec<AccountNode>,
    pub income_accounts: Vec<ClassifiedAccount>,
    pub expense_accounts: Vec<ClassifiedAccount>,
}

pub struct AccountApi<T: Transport = HttpTransport> {
    client: Client<T>,
    classifier: Classifier,
}

impl AccountApi<HttpTransport> {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        Ok(Self::with_client(Client::new(settings)?))
    }
}

impl<T: Transport> AccountApi<T> {
    pub fn with_client(client: Client<T>) -> Self {
        AccountApi {
            client,
            classifier: Classifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    /// Fetch the tree of accounts, normalize it and classify its nodes.
    /// On error, all lists are empty.
    pub async fn fetch_account_tree(&self) -> AccountTreeData {
        match self.client.get(ACCOUNT_TREE_PATH, &[]).await {
            Ok(body) => {
                let tree = AccountTree::new(normalize_nodes(&unwrap_payload(body)));
                log::info!(
                    "Fetched {} accounts, max depth {}",
                    tree.count(),
                    tree.max_depth()
                );
                let classification = self.classifier.classify(&tree);
                AccountTreeData {
                    all_accounts: tree.into_roots(),
                    income_accounts: classification.income,
                    expense_accounts: classification.expense,
                }
            }
            Err(e) => {
                log::error!("Failed to fetch the account tree: {}", e);
                AccountTreeData::default()
            }
        }
    }

    /// The statistics rows as returned by the server, or an empty list on
    /// error.
    pub async fn get_account_statistics(
        &self,
        query: &StatisticsQuery,
    ) -> Vec<Value> {
        log::debug!("Fetching account statistics: {:?}", query);
        match self.client.post(ACCOUNT_STATISTICS_PATH, query).await {
            Ok(body) => match data_array(body) {
                Some(rows) => rows,
                None => {
                    log::warn!("Unexpected shape for account statistics");
                    Vec::new()
                }
            },
            Err(e) => {
                log::error!("Failed to fetch account statistics: {}", e);
                Vec::new()
            }
        }
    }
}

/// The tree endpoint returns either the list of nodes directly, or an
/// object with the list in its "data" field.  Anything else is considered
/// as an empty list.
fn unwrap_payload(body: Body) -> Value {
    match body.into_json() {
        Some(list @ Value::Array(_)) => list,
        Some(other) => data_array(Body::Json(other))
            .map(Value::Array)
            .unwrap_or_else(|| Value::Array(Vec::new())),
        None => Value::Array(Vec::new()),
    }
}

/// The "data" field of the body, when it is an array
fn data_array(body: Body) -> Option<Vec<Value>> {
    match body.into_json()? {
        Value::Object(mut fields) => match fields.remove("data")? {
            Value::Array(rows) => Some(rows),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => None,
        },
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Array(_) => None,
    }
}

#[cfg(test)]
mod test {
    use crate::account_api::{AccountApi, AccountTreeData};
    use crate::accounts::AccountNode;
    use crate::classify::Classifier;
    use crate::errors::Error;
    use crate::request::test::{fake_client, FakeTransport};
    use crate::request::RawResponse;
    use crate::statistics::{GroupBy, StatisticsQuery, TransactionType};
    use chrono::NaiveDate;
    use reqwest::Method;
    use serde_json::json;

    fn make_api(transport: FakeTransport) -> AccountApi<FakeTransport> {
        AccountApi::with_client(fake_client(transport))
    }

    fn query() -> StatisticsQuery {
        StatisticsQuery {
            account_ids: vec!["201".to_string()],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            group_by: GroupBy::Month,
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn test_tree_bare_array() {
        let api = make_api(FakeTransport::default()
            .json(200, json!([{"id": "101", "name": "Salary"}])));
        let data = api.fetch_account_tree().await;
        assert_eq!(
            data.all_accounts,
            vec![AccountNode::new("101", "Salary", "unknown")]
        );
        assert_eq!(data.income_accounts.len(), 1);
        assert_eq!(data.income_accounts[0].account.label, "Salary");
        assert_eq!(data.income_accounts[0].parent_path, "Salary");
        assert!(data.expense_accounts.is_empty());

        let sent = api.client().transport().sent.borrow();
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(sent[0].url, "http://test/api/account/tree");
    }

    #[tokio::test]
    async fn test_tree_data_field() {
        let api = make_api(FakeTransport::default().json(
            200,
            json!({"data": [
                {"guid": "E", "name": "支出", "children": [
                    {"code": "5", "name": "餐饮"},
                ]},
                {"id": "2", "label": "Rent", "accountType": "expense"},
            ]}),
        ));
        let data = api.fetch_account_tree().await;
        assert_eq!(data.all_accounts.len(), 2);
        let expense: Vec<_> = data
            .expense_accounts
            .iter()
            .map(|a| a.parent_path.as_str())
            .collect();
        assert_eq!(expense, ["支出", "Rent"]);

        // "餐饮" is unclassified, but still in the tree
        assert_eq!(data.all_accounts[0].children[0].label, "餐饮");
    }

    #[tokio::test]
    async fn test_tree_unexpected_shape() {
        for body in [json!({"data": "nope"}), json!({"items": []}), json!(3)] {
            let api = make_api(FakeTransport::default().json(200, body));
            assert_eq!(api.fetch_account_tree().await, AccountTreeData::default());
        }

        let api = make_api(FakeTransport::default().answer(Ok(RawResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: "<html></html>".to_string(),
        })));
        assert_eq!(api.fetch_account_tree().await, AccountTreeData::default());
    }

    #[tokio::test]
    async fn test_tree_failure() {
        let api = make_api(FakeTransport::default()
            .answer(Err(Error::Network("connection refused".into()))));
        let data = api.fetch_account_tree().await;
        assert_eq!(data, AccountTreeData::default());
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"allAccounts": [], "incomeAccounts": [], "expenseAccounts": []})
        );

        let api = make_api(FakeTransport::default().json(503, json!({})));
        assert_eq!(api.fetch_account_tree().await, AccountTreeData::default());
    }

    #[tokio::test]
    async fn test_tree_custom_classifier() {
        let api = make_api(FakeTransport::default()
            .json(200, json!([{"id": "9", "name": "Revenus"}])))
        .with_classifier(Classifier::new(&["revenu"], &["dépense"]));
        let data = api.fetch_account_tree().await;
        assert_eq!(data.income_accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_statistics() {
        let api = make_api(FakeTransport::default().json(
            200,
            json!({"data": [{"period": "2024-01", "amount": 12.5}]}),
        ));
        let rows = api.get_account_statistics(&query()).await;
        assert_eq!(rows, vec![json!({"period": "2024-01", "amount": 12.5})]);

        let sent = api.client().transport().sent.borrow();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url, "http://test/api/account/statistics");
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "accountIds": ["201"],
                "startDate": "2024-01-01",
                "endDate": "2024-03-31",
                "groupBy": "MONTH",
                "transactionType": "EXPENSE",
            })
        );
    }

    #[tokio::test]
    async fn test_statistics_without_data() {
        for body in [json!([1, 2]), json!({"rows": []}), json!({"data": {}})] {
            let api = make_api(FakeTransport::default().json(200, body));
            assert!(api.get_account_statistics(&query()).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_statistics_failure() {
        let api = make_api(FakeTransport::default().json(500, json!({})));
        assert!(api.get_account_statistics(&query()).await.is_empty());
    }
}
