use crate::account_categories::AccountCategory;
use crate::accounts::AccountNode;
use crate::trees::AccountTree;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const PATH_SEPARATOR: &str = " / ";

/// Why an account was put in a bucket.  Rules are tested in the order they
/// are declared here, and the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassificationRule {
    IncomeType,
    ExpenseType,
    IncomeLabel,
    ExpenseLabel,
    IncomeIdPrefix,
    ExpenseIdPrefix,
}

impl ClassificationRule {
    pub fn category(&self) -> AccountCategory {
        match self {
            ClassificationRule::IncomeType
            | ClassificationRule::IncomeLabel
            | ClassificationRule::IncomeIdPrefix => AccountCategory::INCOME,
            ClassificationRule::ExpenseType
            | ClassificationRule::ExpenseLabel
            | ClassificationRule::ExpenseIdPrefix => AccountCategory::EXPENSE,
        }
    }
}

impl std::fmt::Display for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            ClassificationRule::IncomeType => "accountType=income",
            ClassificationRule::ExpenseType => "accountType=expense",
            ClassificationRule::IncomeLabel => "label mentions income",
            ClassificationRule::ExpenseLabel => "label mentions expense",
            ClassificationRule::IncomeIdPrefix => "id starts with 1",
            ClassificationRule::ExpenseIdPrefix => "id starts with 2",
        };
        f.write_str(reason)
    }
}

/// An account that was put in one of the buckets, along with its location
/// in the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedAccount {
    #[serde(flatten)]
    pub account: AccountNode,

    // Labels of all ancestors, then the account's own label
    pub parent_path: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub income: Vec<ClassifiedAccount>,
    pub expense: Vec<ClassifiedAccount>,
}

/// Heuristics to sort accounts into income and expense.  Servers rarely
/// give a reliable account type, so we also look at the labels (in several
/// languages) and at the numbering scheme of the chart of accounts.
#[derive(Clone, Debug)]
pub struct Classifier {
    // Lower-cased
    income_tokens: Vec<String>,
    expense_tokens: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(&["收入", "income"], &["支出", "expense"])
    }
}

impl Classifier {
    pub fn new(income_tokens: &[&str], expense_tokens: &[&str]) -> Self {
        Classifier {
            income_tokens: income_tokens.iter().map(|t| t.to_lowercase()).collect(),
            expense_tokens: expense_tokens
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    /// Which rule applies to this node, if any.  Children are not looked at.
    pub fn rule_for(&self, node: &AccountNode) -> Option<ClassificationRule> {
        let label = node.label.to_lowercase();
        if node.account_type == "income" {
            Some(ClassificationRule::IncomeType)
        } else if node.account_type == "expense" {
            Some(ClassificationRule::ExpenseType)
        } else if self.income_tokens.iter().any(|t| label.contains(t)) {
            Some(ClassificationRule::IncomeLabel)
        } else if self.expense_tokens.iter().any(|t| label.contains(t)) {
            Some(ClassificationRule::ExpenseLabel)
        } else if node.id.starts_with('1') {
            Some(ClassificationRule::IncomeIdPrefix)
        } else if node.id.starts_with('2') {
            Some(ClassificationRule::ExpenseIdPrefix)
        } else {
            None
        }
    }

    /// Flatten the tree into the two buckets, in depth-first order.
    /// Unclassified accounts are skipped, but their children are still
    /// examined.
    pub fn classify(&self, tree: &AccountTree) -> Classification {
        let mut result = Classification::default();

        tree.traverse_with_ancestors(|node, ancestors| {
            let Some(rule) = self.rule_for(node) else {
                log::debug!("Unclassified account: {} - {}", node.id, node.label);
                return;
            };
            let classified = ClassifiedAccount {
                account: node.clone(),
                parent_path: ancestors
                    .iter()
                    .map(|a| a.label.as_str())
                    .chain(std::iter::once(node.label.as_str()))
                    .join(PATH_SEPARATOR),
            };
            log::debug!(
                "Account {} is {}, path {}, because {}",
                node.label,
                rule.category(),
                classified.parent_path,
                rule,
            );
            match rule.category() {
                AccountCategory::INCOME => result.income.push(classified),
                AccountCategory::EXPENSE => result.expense.push(classified),
            }
        });

        log::info!(
            "Classified {} income and {} expense accounts",
            result.income.len(),
            result.expense.len()
        );
        result
    }
}
