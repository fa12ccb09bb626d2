//! Deadline-based visibility and status for recruitments and events.
//!
//! Nothing here is stored. Every status is derived from the posting's
//! deadline fields and "now" at the moment a listing is built or an action
//! is attempted. Malformed or missing deadlines never fail: they mean the
//! posting is open-ended.

pub mod clock;
pub mod listing;
pub mod posting;

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use serde::Serialize;

pub use clock::{Clock, FixedClock, LifecycleClock, SystemClock};
pub use listing::{annotate, evaluate, sort_by_deadline, visible_listing, Evaluated, LifecycleView};
pub use posting::{AsPosting, DeadlineFields, PostingKind, PostingRef};

/// Time a posting stays listed (as closed) after its deadline.
/// Plain millisecond arithmetic, so a DST shift does not stretch it.
pub const GRACE_PERIOD_MS: i64 = 24 * 60 * 60 * 1000;

pub fn grace_period() -> Duration {
    Duration::milliseconds(GRACE_PERIOD_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingStatus {
    Open,
    Closed,
    Hidden,
}

/// Which action buttons a caller may enable for a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Actions {
    /// Apply (recruitments) or register (events).
    pub primary: bool,
    /// Events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<bool>,
}

impl Actions {
    pub fn can_submit(&self) -> bool {
        self.submit.unwrap_or(false)
    }
}

/// The calendar that decides where a day ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineZone {
    Local,
    Fixed(FixedOffset),
}

impl DeadlineZone {
    /// Falls back to local time when the offset is absent or out of range.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        match minutes.and_then(|m| FixedOffset::east_opt(m.checked_mul(60)?)) {
            Some(offset) => DeadlineZone::Fixed(offset),
            None => DeadlineZone::Local,
        }
    }

    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DeadlineZone::Local => instant.with_timezone(&Local).date_naive(),
            DeadlineZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    fn resolve(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        let resolved = match self {
            DeadlineZone::Local => Local
                .from_local_datetime(&naive)
                .latest()
                .map(|dt| dt.with_timezone(&Utc)),
            DeadlineZone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .latest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        // Only a DST gap lands here; keep the deadline rather than drop it.
        resolved.unwrap_or_else(|| DateTime::from_naive_utc_and_offset(naive, Utc))
    }

    fn end_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_milli_opt(23, 59, 59, 999)
            .map(|naive| self.resolve(naive))
    }
}

/// Classifies postings against a single instant.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    now: DateTime<Utc>,
    zone: DeadlineZone,
}

impl Evaluator {
    pub fn new(now: DateTime<Utc>, zone: DeadlineZone) -> Self {
        Self { now, zone }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn zone(&self) -> DeadlineZone {
        self.zone
    }

    /// Parses a date-like string without normalizing it. Accepts RFC 3339,
    /// `YYYY-MM-DD` (midnight in the deadline zone) and naive
    /// `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read in the deadline zone).
    pub fn parse_date_like(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant.with_timezone(&Utc));
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|naive| self.zone.resolve(naive));
        }

        const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| self.zone.resolve(naive))
    }

    /// Moves a date-like string to 23:59:59.999 of its calendar day in the
    /// deadline zone. Unparseable input is `None`, meaning no deadline.
    pub fn normalize_deadline(&self, raw: &str) -> Option<DateTime<Utc>> {
        self.parse_date_like(raw).and_then(|instant| self.end_of_day(instant))
    }

    /// End of the calendar day containing `instant`. Idempotent.
    pub fn end_of_day(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.zone.end_of_day(self.zone.date_of(instant))
    }

    pub fn is_past_deadline(&self, deadline: Option<DateTime<Utc>>) -> bool {
        deadline
            .and_then(|d| self.end_of_day(d))
            .map(|end| self.now > end)
            .unwrap_or(false)
    }

    pub fn is_within_grace_period(&self, deadline: Option<DateTime<Utc>>) -> bool {
        let Some(end) = deadline.and_then(|d| self.end_of_day(d)) else {
            return false;
        };
        self.now > end && self.now <= end + grace_period()
    }

    pub fn should_hide(&self, posting: PostingRef<'_>) -> bool {
        posting
            .deadline_fields()
            .latest()
            .and_then(|d| self.end_of_day(d))
            .map(|end| self.now > end + grace_period())
            .unwrap_or(false)
    }

    pub fn effective_status(&self, posting: PostingRef<'_>) -> PostingStatus {
        if self.should_hide(posting) {
            PostingStatus::Hidden
        } else if self.is_past_deadline(posting.deadline_fields().latest()) {
            PostingStatus::Closed
        } else {
            PostingStatus::Open
        }
    }

    pub fn actions(&self, posting: PostingRef<'_>) -> Actions {
        let status = self.effective_status(posting);
        match posting {
            PostingRef::Recruitment(club) => Actions {
                primary: status == PostingStatus::Open && club.is_recruiting,
                submit: None,
            },
            PostingRef::Event(event) => Actions {
                primary: status == PostingStatus::Open
                    && event.is_active
                    && !self.is_past_deadline(event.registration_deadline),
                submit: Some(
                    status != PostingStatus::Hidden
                        && event.is_active
                        && !self.is_past_deadline(event.submission_deadline),
                ),
            },
            PostingRef::Notice(_) => Actions::default(),
        }
    }

    /// Normalized earliest relevant deadline, used to order listings.
    pub fn sort_key(&self, posting: PostingRef<'_>) -> Option<DateTime<Utc>> {
        posting
            .deadline_fields()
            .earliest()
            .and_then(|d| self.end_of_day(d))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::domain::{Club, ClubCategory, Event, Notice, NoticeCategory, NoticeStatus};

    pub fn club(name: &str, deadline: Option<DateTime<Utc>>, is_recruiting: bool) -> Club {
        Club {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("Join {}", name),
            logo: String::new(),
            category: ClubCategory::Coding,
            role: "Developer".to_string(),
            is_recruiting,
            recruitment_deadline: deadline,
            requirements: None,
            contact_email: "club@example.com".to_string(),
            application_form_link: String::new(),
            response_sheet_link: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn event(
        registration: Option<DateTime<Utc>>,
        submission: Option<DateTime<Utc>>,
        event_date: Option<DateTime<Utc>>,
    ) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Hackathon".to_string(),
            problem_statement: "Build something".to_string(),
            description: "Annual hackathon".to_string(),
            club_name: "ACM".to_string(),
            event_date,
            registration_deadline: registration,
            submission_deadline: submission,
            is_active: true,
            prizes: None,
            rules: None,
            registration_form_link: String::new(),
            submission_form_link: String::new(),
            registration_response_link: String::new(),
            submission_response_link: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn notice() -> Notice {
        Notice {
            id: Uuid::new_v4(),
            title: "Orientation".to_string(),
            content: "Welcome week".to_string(),
            category: NoticeCategory::General,
            club_name: "Other".to_string(),
            tags: vec![],
            is_active: true,
            status: NoticeStatus::Expired,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{club, event, notice};
    use super::*;
    use chrono::Timelike;

    fn ist() -> DeadlineZone {
        DeadlineZone::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
    }

    fn at(zone: DeadlineZone, y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap();
        zone.resolve(naive)
    }

    fn evaluator_at(now: DateTime<Utc>) -> Evaluator {
        Evaluator::new(now, ist())
    }

    #[test]
    fn test_normalize_date_only_is_end_of_day() {
        let ev = evaluator_at(Utc::now());
        let normalized = ev.normalize_deadline("2025-03-24").unwrap();
        let local = normalized.with_timezone(&FixedOffset::east_opt(19800).unwrap());
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 24).unwrap());
        assert_eq!((local.hour(), local.minute(), local.second()), (23, 59, 59));
        assert_eq!(local.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_normalize_in_process_local_time() {
        let ev = Evaluator::new(Utc::now(), DeadlineZone::Local);
        let normalized = ev.normalize_deadline("2025-03-24").unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 24)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(normalized.with_timezone(&Local).naive_local(), expected);
    }

    #[test]
    fn test_normalize_rfc3339_uses_local_calendar_day() {
        let ev = evaluator_at(Utc::now());
        // 20:00Z is already 01:30 on the 25th in IST.
        let normalized = ev.normalize_deadline("2025-03-24T20:00:00Z").unwrap();
        assert_eq!(normalized, at(ist(), 2025, 3, 25, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_normalize_naive_datetime() {
        let ev = evaluator_at(Utc::now());
        assert_eq!(
            ev.normalize_deadline("2025-03-24T10:15"),
            ev.normalize_deadline("2025-03-24"),
        );
        assert_eq!(
            ev.normalize_deadline("2025-03-24 08:00:00"),
            ev.normalize_deadline("2025-03-24"),
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let ev = evaluator_at(Utc::now());
        assert_eq!(ev.normalize_deadline(""), None);
        assert_eq!(ev.normalize_deadline("   "), None);
        assert_eq!(ev.normalize_deadline("next tuesday"), None);
        assert_eq!(ev.normalize_deadline("2025-02-30"), None);
    }

    #[test]
    fn test_parse_date_like_keeps_time() {
        let ev = evaluator_at(Utc::now());
        assert_eq!(ev.parse_date_like("2025-03-24T10:15"), Some(at(ist(), 2025, 3, 24, 10, 15, 0)));
        assert_eq!(ev.parse_date_like("2025-03-24"), Some(at(ist(), 2025, 3, 24, 0, 0, 0)));
        assert_eq!(ev.parse_date_like("soon"), None);
    }

    #[test]
    fn test_end_of_day_is_idempotent() {
        let ev = evaluator_at(Utc::now());
        let once = ev.normalize_deadline("2025-03-24").unwrap();
        assert_eq!(ev.end_of_day(once), Some(once));
    }

    #[test]
    fn test_deadline_today_lifecycle() {
        let deadline = at(ist(), 2025, 3, 24, 9, 0, 0);
        let posting = club("ACM", Some(deadline), true);

        let tonight = evaluator_at(at(ist(), 2025, 3, 24, 23, 0, 0));
        assert_eq!(tonight.effective_status(posting.as_posting()), PostingStatus::Open);

        let tomorrow = evaluator_at(at(ist(), 2025, 3, 25, 0, 0, 1));
        assert_eq!(tomorrow.effective_status(posting.as_posting()), PostingStatus::Closed);

        let day_after = evaluator_at(at(ist(), 2025, 3, 26, 0, 0, 1));
        assert_eq!(day_after.effective_status(posting.as_posting()), PostingStatus::Hidden);
    }

    #[test]
    fn test_grace_window_boundaries() {
        let ev = evaluator_at(Utc::now());
        let end = ev.normalize_deadline("2025-03-24").unwrap();
        let posting = club("E-Cell", Some(end), true);

        let at_end = evaluator_at(end);
        assert_eq!(at_end.effective_status(posting.as_posting()), PostingStatus::Open);
        assert!(!at_end.is_past_deadline(Some(end)));

        let last_grace_instant = evaluator_at(end + grace_period());
        assert_eq!(last_grace_instant.effective_status(posting.as_posting()), PostingStatus::Closed);
        assert!(last_grace_instant.is_within_grace_period(Some(end)));

        let beyond = evaluator_at(end + grace_period() + Duration::milliseconds(1));
        assert_eq!(beyond.effective_status(posting.as_posting()), PostingStatus::Hidden);
        assert!(!beyond.is_within_grace_period(Some(end)));
        assert!(beyond.should_hide(posting.as_posting()));
    }

    #[test]
    fn test_no_deadline_is_always_open() {
        let posting = club("PAG", None, true);
        for years in [-10, 0, 10] {
            let ev = evaluator_at(Utc::now() + Duration::days(365 * years));
            assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Open);
            assert!(!ev.is_past_deadline(None));
            assert!(!ev.is_within_grace_period(None));
            assert!(ev.actions(posting.as_posting()).primary);
        }
    }

    #[test]
    fn test_apply_requires_recruiting_flag() {
        let ev = evaluator_at(at(ist(), 2025, 3, 20, 12, 0, 0));
        let deadline = Some(at(ist(), 2025, 3, 24, 0, 0, 0));

        let recruiting = club("RMS", deadline, true);
        assert!(ev.actions(recruiting.as_posting()).primary);

        let paused = club("RMS", deadline, false);
        assert_eq!(ev.effective_status(paused.as_posting()), PostingStatus::Open);
        assert!(!ev.actions(paused.as_posting()).primary);
        assert_eq!(ev.actions(paused.as_posting()).submit, None);
    }

    #[test]
    fn test_closed_recruitment_disables_apply() {
        let deadline = Some(at(ist(), 2025, 3, 24, 0, 0, 0));
        let posting = club("ACM", deadline, true);
        let ev = evaluator_at(at(ist(), 2025, 3, 25, 10, 0, 0));
        assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Closed);
        assert!(!ev.actions(posting.as_posting()).primary);
    }

    #[test]
    fn test_event_submission_outlives_registration() {
        let posting = event(
            Some(at(ist(), 2025, 3, 10, 0, 0, 0)),
            Some(at(ist(), 2025, 3, 30, 0, 0, 0)),
            Some(at(ist(), 2025, 3, 15, 0, 0, 0)),
        );
        let ev = evaluator_at(at(ist(), 2025, 3, 20, 12, 0, 0));

        assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Open);
        let actions = ev.actions(posting.as_posting());
        assert!(!actions.primary);
        assert!(actions.can_submit());
    }

    #[test]
    fn test_event_in_grace_disables_everything() {
        let posting = event(
            Some(at(ist(), 2025, 3, 10, 0, 0, 0)),
            Some(at(ist(), 2025, 3, 20, 0, 0, 0)),
            None,
        );
        let ev = evaluator_at(at(ist(), 2025, 3, 21, 8, 0, 0));
        assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Closed);
        let actions = ev.actions(posting.as_posting());
        assert!(!actions.primary);
        assert!(!actions.can_submit());
    }

    #[test]
    fn test_inactive_event_disables_actions() {
        let mut posting = event(None, None, Some(at(ist(), 2025, 4, 1, 0, 0, 0)));
        posting.is_active = false;
        let ev = evaluator_at(at(ist(), 2025, 3, 1, 0, 0, 0));
        assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Open);
        assert_eq!(ev.actions(posting.as_posting()), Actions { primary: false, submit: Some(false) });
    }

    #[test]
    fn test_event_latest_deadline_falls_back() {
        let only_date = event(None, None, Some(at(ist(), 2025, 3, 10, 0, 0, 0)));
        let ev = evaluator_at(at(ist(), 2025, 3, 12, 0, 0, 0));
        assert_eq!(ev.effective_status(only_date.as_posting()), PostingStatus::Hidden);

        let registration_only = event(Some(at(ist(), 2025, 3, 11, 0, 0, 0)), None, Some(at(ist(), 2025, 3, 1, 0, 0, 0)));
        assert_eq!(ev.effective_status(registration_only.as_posting()), PostingStatus::Closed);

        // A later submission deadline wins even if the event date is long gone.
        let submission_later = event(None, Some(at(ist(), 2025, 3, 20, 0, 0, 0)), Some(at(ist(), 2025, 3, 1, 0, 0, 0)));
        assert_eq!(ev.effective_status(submission_later.as_posting()), PostingStatus::Open);
    }

    #[test]
    fn test_notice_ignores_lifecycle() {
        let posting = notice();
        let ev = evaluator_at(Utc::now() + Duration::days(3650));
        assert!(!ev.should_hide(posting.as_posting()));
        assert_eq!(ev.effective_status(posting.as_posting()), PostingStatus::Open);
        assert_eq!(ev.actions(posting.as_posting()), Actions::default());
    }

    #[test]
    fn test_zone_from_offset_minutes() {
        assert_eq!(DeadlineZone::from_offset_minutes(None), DeadlineZone::Local);
        assert_eq!(DeadlineZone::from_offset_minutes(Some(330)), ist());
        assert_eq!(DeadlineZone::from_offset_minutes(Some(100_000)), DeadlineZone::Local);
    }

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&PostingStatus::Closed).unwrap(), "\"CLOSED\"");
    }
}
