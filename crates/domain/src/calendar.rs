use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month(NaiveDate);

impl Month {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date - Duration::days(i64::from(date.day0())))
    }

    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::of(self.0 - Duration::days(1))
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::of(self.0 + Duration::days(31))
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.0
            .iter_days()
            .take_while(move |d| d.month() == self.0.month())
    }

    #[must_use]
    pub fn title(self) -> String {
        format!(
            "{} de {}",
            MONTH_NAMES[self.0.month0() as usize],
            self.0.year()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(CalendarDay),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub trained: bool,
    pub today: bool,
    pub future: bool,
}

impl CalendarDay {
    /// Whether a past session may be logged on this day.
    #[must_use]
    pub fn selectable(&self) -> bool {
        !self.future
    }
}

/// Cells of a month view with weeks starting on Sunday.
#[must_use]
pub fn month_grid(
    month: Month,
    trained_days: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let blanks = month.first_day().weekday().num_days_from_sunday() as usize;
    std::iter::repeat_n(CalendarCell::Blank, blanks)
        .chain(month.days().map(|date| {
            CalendarCell::Day(CalendarDay {
                date,
                trained: trained_days.contains(&date),
                today: date == today,
                future: date > today,
            })
        }))
        .collect()
}
