use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

/// A calendar month without a day component
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    // always 1..=12
    month: u32,
}

impl YearMonth {
    /// Builds a month, normalizing out-of-range months into year carries
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month: 1 }.shifted(month as i64 - 1)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves by `delta` months. Years saturate at the range chrono can
    /// represent so day-level queries always succeed.
    pub fn shifted(self, delta: i64) -> Self {
        let index = (self.year as i64 * 12 + (self.month as i64 - 1)).saturating_add(delta);
        let min = NaiveDate::MIN.year() as i64 * 12;
        let max = NaiveDate::MAX.year() as i64 * 12 + 11;
        let index = index.clamp(min, max);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Sunday = 0 weekday index of the first day of the month
    pub fn first_weekday_offset(self) -> u32 {
        self.first_day()
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    /// e.g. "February 2024"
    pub fn label(self) -> String {
        match self.first_day() {
            Some(d) => d.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// How a day cell should be highlighted. Today wins over an attached note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayMarker {
    Today,
    Noted,
    Plain,
}

/// Month navigation plus a per-date note store
#[derive(Debug, Clone)]
pub struct CalendarStore {
    visible: YearMonth,
    // only non-empty notes are ever stored
    events: BTreeMap<NaiveDate, String>,
}

impl CalendarStore {
    pub fn new(visible: YearMonth) -> Self {
        Self {
            visible,
            events: BTreeMap::new(),
        }
    }

    pub fn starting_today() -> Self {
        Self::new(YearMonth::of(Local::now().date_naive()))
    }

    pub fn visible_month(&self) -> YearMonth {
        self.visible
    }

    pub fn navigate(&mut self, delta_months: i64) {
        self.visible = self.visible.shifted(delta_months);
        debug!(
            "event=calendar_navigate delta={delta_months} visible={}-{:02}",
            self.visible.year, self.visible.month
        );
    }

    pub fn days_in_visible_month(&self) -> u32 {
        self.visible.days()
    }

    pub fn first_weekday_offset(&self) -> u32 {
        self.visible.first_weekday_offset()
    }

    /// Stores `note` for `date`; an empty note removes the entry instead
    pub fn set_event(&mut self, date: NaiveDate, note: &str) {
        if note.is_empty() {
            if self.events.remove(&date).is_some() {
                debug!("event=calendar_note_removed date={date}");
            }
        } else {
            self.events.insert(date, note.to_string());
            debug!("event=calendar_note_set date={date} len={}", note.len());
        }
    }

    pub fn get_event(&self, date: NaiveDate) -> Option<&str> {
        self.events.get(&date).map(String::as_str)
    }

    pub fn has_event(&self, date: NaiveDate) -> bool {
        self.events.contains_key(&date)
    }

    pub fn marker(&self, date: NaiveDate, today: NaiveDate) -> DayMarker {
        if date == today {
            DayMarker::Today
        } else if self.has_event(date) {
            DayMarker::Noted
        } else {
            DayMarker::Plain
        }
    }

    /// Day cells for the visible month, left-padded with `None` up to the
    /// weekday of the first.
    pub fn grid(&self) -> Vec<Option<NaiveDate>> {
        let offset = self.first_weekday_offset() as usize;
        let mut cells = vec![None; offset];
        cells.extend((1..=self.days_in_visible_month()).map(|d| self.visible.day(d)));
        cells
    }

    pub fn events_in_visible_month(&self) -> Vec<(NaiveDate, &str)> {
        let Some(first) = self.visible.first_day() else {
            return Vec::new();
        };
        self.events
            .range(first..)
            .take_while(|(date, _)| self.visible.contains(**date))
            .map(|(date, note)| (*date, note.as_str()))
            .collect()
    }
}
