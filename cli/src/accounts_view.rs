use clap::{arg, Arg, ArgMatches};
use ledger_api::account_api::AccountTreeData;
use ledger_api::account_categories::AccountCategory;
use ledger_api::classify::ClassifiedAccount;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Category")]
    category: AccountCategory,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Type")]
    account_type: String,
}

pub struct Settings {
    pub show_income: bool,
    pub show_expense: bool,
}

impl Settings {
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--income "Only show income accounts")
                .conflicts_with("expense"),
            arg!(--expense "Only show expense accounts"),
        ]
    }

    pub fn new(args: &ArgMatches) -> Self {
        let income = args.get_flag("income");
        let expense = args.get_flag("expense");
        Settings {
            // Show both when neither is selected
            show_income: income || !expense,
            show_expense: expense || !income,
        }
    }
}

pub fn accounts_view(data: &AccountTreeData, settings: &Settings) -> String {
    let to_row = |category: AccountCategory, acc: &ClassifiedAccount| Row {
        category,
        path: acc.parent_path.clone(),
        id: acc.account.id.clone(),
        account_type: acc.account.account_type.clone(),
    };

    let mut rows = Vec::new();
    if settings.show_income {
        rows.extend(
            data.income_accounts
                .iter()
                .map(|a| to_row(AccountCategory::INCOME, a)),
        );
    }
    if settings.show_expense {
        rows.extend(
            data.expense_accounts
                .iter()
                .map(|a| to_row(AccountCategory::EXPENSE, a)),
        );
    }
    Table::new(rows).with(Style::rounded()).to_string()
}
