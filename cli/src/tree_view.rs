use ledger_api::accounts::AccountNode;
use ledger_api::trees::AccountTree;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Account")]
    label: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Type")]
    account_type: String,
}

pub struct Settings {
    pub indent_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { indent_size: 2 }
    }
}

/// Show the accounts as an indented table
pub fn tree_view(accounts: &[AccountNode], settings: &Settings) -> String {
    let tree = AccountTree::new(accounts.to_vec());
    let mut rows = Vec::new();
    tree.traverse_with_ancestors(|node, ancestors| {
        rows.push(Row {
            label: format!(
                "{: <width$}{}",
                "",
                node.label,
                width = ancestors.len() * settings.indent_size
            ),
            id: node.id.clone(),
            account_type: node.account_type.clone(),
        });
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod test {
    use crate::tree_view::{tree_view, Settings};
    use ledger_api::accounts::AccountNode;

    #[test]
    fn test_indent() {
        let accounts = vec![AccountNode::new("1", "Income", "income")
            .with_children(vec![AccountNode::new("11", "Salary", "income")])];
        let output = tree_view(&accounts, &Settings::default());
        assert!(output.contains("│ Income "));
        assert!(output.contains("│   Salary "));
        assert!(output.contains("Account"));
    }
}
