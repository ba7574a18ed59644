/// The buckets that accounts are sorted into for the income and expense
/// views.  Accounts that fit neither (assets, liabilities,...) are simply
/// not classified.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountCategory {
    INCOME,
    EXPENSE,
}

impl AccountCategory {
    pub fn is_income(&self) -> bool {
        matches!(self, AccountCategory::INCOME)
    }
    pub fn is_expense(&self) -> bool {
        matches!(self, AccountCategory::EXPENSE)
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountCategory::INCOME => write!(f, "income"),
            AccountCategory::EXPENSE => write!(f, "expense"),
        }
    }
}
