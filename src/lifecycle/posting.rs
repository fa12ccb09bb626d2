use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Club, Event, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingKind {
    Recruitment,
    Event,
    Notice,
}

/// Borrowed view over any posting the evaluator can classify.
#[derive(Debug, Clone, Copy)]
pub enum PostingRef<'a> {
    Recruitment(&'a Club),
    Event(&'a Event),
    Notice(&'a Notice),
}

/// Raw deadline instants of a posting, before end-of-day normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeadlineFields {
    /// Recruitment deadline or event registration deadline.
    pub primary: Option<DateTime<Utc>>,
    pub submission: Option<DateTime<Utc>>,
    pub event_date: Option<DateTime<Utc>>,
}

impl DeadlineFields {
    /// The deadline that governs visibility: submission, then primary,
    /// then event date.
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        self.submission.or(self.primary).or(self.event_date)
    }

    pub fn earliest(&self) -> Option<DateTime<Utc>> {
        [self.primary, self.submission, self.event_date]
            .into_iter()
            .flatten()
            .min()
    }
}

impl<'a> PostingRef<'a> {
    pub fn kind(&self) -> PostingKind {
        match self {
            PostingRef::Recruitment(_) => PostingKind::Recruitment,
            PostingRef::Event(_) => PostingKind::Event,
            PostingRef::Notice(_) => PostingKind::Notice,
        }
    }

    pub fn deadline_fields(&self) -> DeadlineFields {
        match self {
            PostingRef::Recruitment(club) => DeadlineFields {
                primary: club.recruitment_deadline,
                ..Default::default()
            },
            PostingRef::Event(event) => DeadlineFields {
                primary: event.registration_deadline,
                submission: event.submission_deadline,
                event_date: event.event_date,
            },
            PostingRef::Notice(_) => DeadlineFields::default(),
        }
    }

    /// Name of the club that owns the posting.
    pub fn owner(&self) -> &'a str {
        match *self {
            PostingRef::Recruitment(club) => &club.name,
            PostingRef::Event(event) => &event.club_name,
            PostingRef::Notice(notice) => &notice.club_name,
        }
    }
}

pub trait AsPosting {
    fn as_posting(&self) -> PostingRef<'_>;
}

impl AsPosting for Club {
    fn as_posting(&self) -> PostingRef<'_> {
        PostingRef::Recruitment(self)
    }
}

impl AsPosting for Event {
    fn as_posting(&self) -> PostingRef<'_> {
        PostingRef::Event(self)
    }
}

impl AsPosting for Notice {
    fn as_posting(&self) -> PostingRef<'_> {
        PostingRef::Notice(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::fixtures::{club, event, notice};
    use chrono::TimeZone;

    #[test]
    fn test_deadline_fields_per_variant() {
        let d1 = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
        let d3 = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();

        let recruitment = club("ACM", Some(d1), true);
        assert_eq!(recruitment.as_posting().deadline_fields().latest(), Some(d1));
        assert_eq!(recruitment.as_posting().kind(), PostingKind::Recruitment);
        assert_eq!(recruitment.as_posting().owner(), "ACM");

        let hackathon = event(Some(d1), Some(d2), Some(d3));
        let fields = hackathon.as_posting().deadline_fields();
        assert_eq!(fields.latest(), Some(d2));
        assert_eq!(fields.earliest(), Some(d1));

        let no_submission = event(Some(d2), None, Some(d3));
        assert_eq!(no_submission.as_posting().deadline_fields().latest(), Some(d2));

        assert_eq!(notice().as_posting().deadline_fields(), DeadlineFields::default());
    }
}
