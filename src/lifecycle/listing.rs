use serde::Serialize;

use super::{Actions, AsPosting, Evaluator, PostingKind, PostingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleView {
    pub kind: PostingKind,
    pub status: PostingStatus,
    pub actions: Actions,
}

/// A posting together with its derived lifecycle, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluated<T> {
    #[serde(flatten)]
    pub posting: T,
    pub lifecycle: LifecycleView,
}

pub fn evaluate<T: AsPosting>(posting: T, evaluator: &Evaluator) -> Evaluated<T> {
    let lifecycle = LifecycleView {
        kind: posting.as_posting().kind(),
        status: evaluator.effective_status(posting.as_posting()),
        actions: evaluator.actions(posting.as_posting()),
    };
    Evaluated { posting, lifecycle }
}

/// Ascending by earliest relevant deadline; postings without one go last.
/// Stable, so store order breaks ties.
pub fn sort_by_deadline<T: AsPosting>(postings: &mut [T], evaluator: &Evaluator) {
    postings.sort_by_cached_key(|posting| {
        let key = evaluator.sort_key(posting.as_posting());
        (key.is_none(), key)
    });
}

/// Student-facing listing: hidden postings dropped, the rest sorted and
/// annotated.
pub fn visible_listing<T: AsPosting>(postings: Vec<T>, evaluator: &Evaluator) -> Vec<Evaluated<T>> {
    let mut visible: Vec<T> = postings
        .into_iter()
        .filter(|posting| !evaluator.should_hide(posting.as_posting()))
        .collect();
    sort_by_deadline(&mut visible, evaluator);
    annotate(visible, evaluator)
}

/// Annotates without hiding anything. Admin panels use this.
pub fn annotate<T: AsPosting>(postings: Vec<T>, evaluator: &Evaluator) -> Vec<Evaluated<T>> {
    postings
        .into_iter()
        .map(|posting| evaluate(posting, evaluator))
        .collect()
}
