use chrono::{Days, Months, NaiveDate};

/// Specifies a day, relative to some "today".
/// Such a specification can be given on the command line, for instance
/// as "one year ago", and remains meaningful whenever it is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instant {
    Today,
    DaysAgo(u64),
    MonthsAgo(u32),
    YearsAgo(u32),
}

impl Instant {
    /// Convert self to an actual date.  Dates too far in the past saturate
    /// to the earliest date chrono supports.
    pub fn to_date(&self, today: NaiveDate) -> NaiveDate {
        let date = match self {
            Instant::Today => Some(today),
            Instant::DaysAgo(count) => today.checked_sub_days(Days::new(*count)),
            Instant::MonthsAgo(count) => {
                today.checked_sub_months(Months::new(*count))
            }
            Instant::YearsAgo(count) => count
                .checked_mul(12)
                .and_then(|m| today.checked_sub_months(Months::new(m))),
        };
        date.unwrap_or(NaiveDate::MIN)
    }
}

/// A range of dates [start; end] including both ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Range {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Range { start, end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    Days(u64),
    Months(u32),
    Years(u32),
}

impl Interval {
    /// The range of dates that ends today and spans the interval.
    pub fn to_range(&self, today: NaiveDate) -> Range {
        let start = match self {
            Interval::Days(count) => Instant::DaysAgo(*count),
            Interval::Months(count) => Instant::MonthsAgo(*count),
            Interval::Years(count) => Instant::YearsAgo(*count),
        };
        Range::new(start.to_date(today), Instant::Today.to_date(today))
    }
}

#[cfg(test)]
mod test {
    use crate::times::{Instant, Interval, Range};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_instant() {
        let today = date(2024, 3, 31);
        assert_eq!(Instant::Today.to_date(today), today);
        assert_eq!(Instant::DaysAgo(31).to_date(today), date(2024, 2, 29));
        assert_eq!(Instant::MonthsAgo(1).to_date(today), date(2024, 2, 29));
        assert_eq!(Instant::YearsAgo(2).to_date(today), date(2022, 3, 31));
        assert_eq!(Instant::YearsAgo(u32::MAX).to_date(today), NaiveDate::MIN);
    }

    #[test]
    fn test_interval() {
        let today = date(2024, 6, 15);
        assert_eq!(
            Interval::Months(6).to_range(today),
            Range::new(date(2023, 12, 15), today)
        );
        assert_eq!(
            Interval::Years(1).to_range(today),
            Range::new(date(2023, 6, 15), today)
        );
        assert_eq!(
            Interval::Days(0).to_range(today),
            Range::new(today, today)
        );
    }
}
