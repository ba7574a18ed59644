use chrono::NaiveDate;
use clap::{arg, Arg, ArgMatches};
use itertools::Itertools;
use ledger_api::statistics::{GroupBy, StatisticsQuery, TransactionType};
use ledger_api::times::{Interval, Range};
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};

pub struct Settings {
    pub transaction_type: TransactionType,
    pub group_by: GroupBy,
    pub range: Range,

    // If empty, all accounts of the matching category
    pub account_ids: Vec<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

impl Settings {
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            Arg::new("type")
                .long("type")
                .value_name("TYPE")
                .help("Which transactions to consider")
                .required(true)
                .value_parser(["income", "expense"]),
            arg!(--"group-by" [PERIOD] "How to group transactions")
                .value_parser(["day", "week", "month", "quarter", "year"])
                .default_value("month"),
            arg!(--months [N] "Number of months before today to consider")
                .value_parser(clap::value_parser!(u32))
                .default_value("12"),
            arg!(--start [DATE] "First day to consider (YYYY-MM-DD)")
                .value_parser(parse_date)
                .requires("end"),
            arg!(--end [DATE] "Last day to consider (YYYY-MM-DD)")
                .value_parser(parse_date)
                .requires("start"),
            arg!([ids] ... "Ids of the accounts to consider"),
        ]
    }

    pub fn new(args: &ArgMatches, today: NaiveDate) -> Self {
        let transaction_type =
            match args.get_one::<String>("type").map(String::as_str) {
                Some("income") => TransactionType::Income,
                _ => TransactionType::Expense,
            };
        let group_by =
            match args.get_one::<String>("group-by").map(String::as_str) {
                Some("day") => GroupBy::Day,
                Some("week") => GroupBy::Week,
                Some("quarter") => GroupBy::Quarter,
                Some("year") => GroupBy::Year,
                _ => GroupBy::Month,
            };
        let range = match (
            args.get_one::<NaiveDate>("start"),
            args.get_one::<NaiveDate>("end"),
        ) {
            (Some(start), Some(end)) => Range::new(*start, *end),
            _ => Interval::Months(
                args.get_one::<u32>("months").copied().unwrap_or(12),
            )
            .to_range(today),
        };
        Settings {
            transaction_type,
            group_by,
            range,
            account_ids: args
                .get_many::<String>("ids")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn query(&self, account_ids: Vec<String>) -> StatisticsQuery {
        StatisticsQuery {
            account_ids,
            start_date: self.range.start,
            end_date: self.range.end,
            group_by: self.group_by,
            transaction_type: self.transaction_type,
        }
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

/// Show the rows returned by the server.  Their exact shape is up to the
/// server, so columns are the union of all fields seen in the rows.
pub fn stats_view(rows: &[Value]) -> String {
    if rows.is_empty() {
        return "No statistics".to_string();
    }

    let columns: Vec<&String> = rows
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|obj| obj.keys())
        .unique()
        .collect();

    let mut builder = Builder::default();
    if columns.is_empty() {
        builder.push_record(["value".to_string()]);
        for row in rows {
            builder.push_record([cell(Some(row))]);
        }
    } else {
        builder.push_record(columns.iter().map(|c| c.to_string()));
        for row in rows {
            builder.push_record(
                columns.iter().map(|c| cell(row.get(c.as_str()))),
            );
        }
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod test {
    use crate::args::build_cli;
    use crate::stats_view::{stats_view, Settings};
    use chrono::NaiveDate;
    use ledger_api::statistics::{GroupBy, TransactionType};
    use serde_json::json;

    fn settings(args: &[&str]) -> Settings {
        let mut all = vec!["ledger", "stats"];
        all.extend_from_slice(args);
        let m = build_cli().try_get_matches_from(all).unwrap();
        let (_, sub) = m.subcommand().unwrap();
        Settings::new(sub, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    #[test]
    fn test_settings() {
        let s = settings(&["--type", "income"]);
        assert_eq!(s.transaction_type, TransactionType::Income);
        assert_eq!(s.group_by, GroupBy::Month);
        assert_eq!(s.range.start, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        assert_eq!(s.range.end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert!(s.account_ids.is_empty());

        let s = settings(&[
            "--type", "expense", "--group-by", "day", "--start", "2024-01-01",
            "--end", "2024-01-31", "201",
        ]);
        assert_eq!(s.transaction_type, TransactionType::Expense);
        assert_eq!(s.group_by, GroupBy::Day);
        assert_eq!(s.range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(s.account_ids, ["201"]);

        let q = s.query(vec!["x".to_string()]);
        assert_eq!(q.account_ids, ["x"]);
        assert_eq!(q.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_view() {
        assert_eq!(stats_view(&[]), "No statistics");
        let output = stats_view(&[
            json!({"period": "2024-01", "amount": 12.5}),
            json!({"period": "2024-02", "amount": 3, "note": null}),
        ]);
        assert!(output.contains("period"));
        assert!(output.contains("note"));
        assert!(output.contains("2024-02"));
        assert!(output.contains("12.5"));
    }
}
