//! Tests for the list-fetch controller.
//!
//! Pure state transitions; responses are fabricated, no network.

use super::*;
use crate::model::Uid;

// ===== Test Helpers =====

fn summary(uid: u32) -> CharacterSummary {
    CharacterSummary::new(
        Uid::new(uid.to_string()).expect("valid uid"),
        format!("Character {uid}"),
        format!("https://www.swapi.tech/api/people/{uid}"),
    )
}

fn page_of(uids: std::ops::RangeInclusive<u32>, next: Option<&str>) -> CharacterPage {
    CharacterPage {
        characters: uids.map(summary).collect(),
        next: next.map(str::to_string),
        total_records: Some(82),
        total_pages: Some(9),
    }
}

fn ok(request: &ListRequest, page: CharacterPage) -> ListResponse {
    ListResponse::for_request(request, Ok(page))
}

fn names(controller: &ListController) -> Vec<&str> {
    controller
        .characters()
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

// ===== set_query =====

#[test]
fn new_controller_is_idle() {
    let list = ListController::new(10);
    assert!(!list.is_loading());
    assert!(list.characters().is_empty());
    assert!(!list.has_more());
    assert_eq!(list.generation(), 0);
}

#[test]
fn page_size_is_clamped_to_one() {
    assert_eq!(ListController::new(0).page_size(), 1);
}

#[test]
fn set_query_issues_first_page() {
    let mut list = ListController::new(10);
    let req = list.set_query("");

    assert_eq!(req.query, PageQuery::new("", 1, 10));
    assert!(list.is_loading());
    assert_eq!(list.page(), 1);
}

#[test]
fn set_query_clears_previous_results() {
    let mut list = ListController::new(10);
    let req = list.set_query("");
    list.apply(ok(&req, page_of(1..=10, Some("next"))));
    assert_eq!(list.characters().len(), 10);

    list.set_query("Luke");

    assert!(list.characters().is_empty());
    assert!(!list.has_more());
    assert_eq!(list.total_records(), None);
    assert_eq!(list.query(), "Luke");
}

#[test]
fn search_without_next_has_no_more_pages() {
    let mut list = ListController::new(10);
    let req = list.set_query("Luke");
    assert_eq!(req.query.name, "Luke");

    let luke = CharacterPage {
        characters: vec![CharacterSummary::new(
            Uid::new("1").unwrap(),
            "Luke Skywalker",
            "https://www.swapi.tech/api/people/1",
        )],
        next: None,
        ..CharacterPage::default()
    };
    assert_eq!(list.apply(ok(&req, luke)), Applied::Current);

    assert_eq!(names(&list), vec!["Luke Skywalker"]);
    assert!(!list.has_more());
    assert_eq!(list.load_more(), None, "no request once has_more is false");
}

// ===== load_more =====

#[test]
fn load_more_appends_next_page_in_order() {
    let mut list = ListController::new(10);
    let first = list.set_query("");
    list.apply(ok(&first, page_of(1..=10, Some("page2"))));

    let second = list.load_more().expect("more pages advertised");
    assert_eq!(second.query.page, 2);
    list.apply(ok(&second, page_of(11..=20, Some("page3"))));

    assert_eq!(list.characters().len(), 20);
    assert_eq!(list.characters()[0].name, "Character 1");
    assert_eq!(list.characters()[10].name, "Character 11");
    assert_eq!(list.page(), 2);
    assert!(list.has_more());
}

#[test]
fn load_more_while_loading_is_noop() {
    let mut list = ListController::new(10);
    let first = list.set_query("");
    list.apply(ok(&first, page_of(1..=10, Some("page2"))));

    let second = list.load_more();
    assert!(second.is_some());
    let generation = list.generation();

    assert_eq!(list.load_more(), None);
    assert_eq!(list.generation(), generation, "no new request issued");
    assert_eq!(list.page(), 2);
}

#[test]
fn load_more_before_any_result_is_noop() {
    let mut list = ListController::new(10);
    assert_eq!(list.load_more(), None);
}

#[test]
fn load_more_keeps_search_term() {
    let mut list = ListController::new(5);
    let first = list.set_query("  Sky ");
    list.apply(ok(&first, page_of(1..=5, Some("page2"))));

    let second = list.load_more().unwrap();
    assert_eq!(second.query, PageQuery::new("Sky", 2, 5));
}

// ===== stale responses =====

#[test]
fn response_for_superseded_query_is_discarded() {
    let mut list = ListController::new(10);
    let old = list.set_query("Lu");
    let new = list.set_query("Luke");

    let applied = list.apply(ok(&old, page_of(1..=3, None)));
    assert_eq!(applied, Applied::Stale);
    assert!(list.characters().is_empty());
    assert!(list.is_loading(), "newer request still outstanding");

    list.apply(ok(&new, page_of(1..=1, None)));
    assert_eq!(names(&list), vec!["Character 1"]);
}

#[test]
fn duplicate_response_is_discarded() {
    let mut list = ListController::new(10);
    let req = list.set_query("");
    assert_eq!(list.apply(ok(&req, page_of(1..=10, None))), Applied::Current);
    assert_eq!(list.apply(ok(&req, page_of(1..=2, None))), Applied::Stale);
    assert_eq!(list.characters().len(), 10);
}

#[test]
fn generations_strictly_increase() {
    let mut list = ListController::new(10);
    let a = list.set_query("a");
    let b = list.set_query("b");
    let c = list.set_query("c");
    assert!(a.generation < b.generation && b.generation < c.generation);
}

// ===== failures =====

#[test]
fn failed_next_page_keeps_accumulated_results() {
    let mut list = ListController::new(10);
    let first = list.set_query("");
    list.apply(ok(&first, page_of(1..=10, Some("page2"))));

    let second = list.load_more().unwrap();
    let err = FetchError::Transport("connection reset".into());
    list.apply(ListResponse::for_request(&second, Err(err.clone())));

    assert_eq!(list.characters().len(), 10);
    assert_eq!(list.error(), Some(&err));
    assert!(!list.is_loading());
    assert_eq!(list.page(), 1, "cursor rolled back to last loaded page");
    assert!(list.has_more());
}

#[test]
fn retry_reissues_failed_page() {
    let mut list = ListController::new(10);
    let first = list.set_query("");
    list.apply(ok(&first, page_of(1..=10, Some("page2"))));
    let second = list.load_more().unwrap();
    list.apply(ListResponse::for_request(
        &second,
        Err(FetchError::Status { status: 500 }),
    ));

    let again = list.retry().expect("retry after failure");
    assert_eq!(again.query.page, 2);
    assert!(list.error().is_none(), "error cleared on new request");
    assert!(list.generation() > second.generation);

    list.apply(ok(&again, page_of(11..=20, None)));
    assert_eq!(list.characters().len(), 20);
    assert!(!list.has_more());
}

#[test]
fn load_more_after_failure_requests_same_page() {
    let mut list = ListController::new(10);
    let first = list.set_query("");
    list.apply(ok(&first, page_of(1..=10, Some("page2"))));
    let second = list.load_more().unwrap();
    list.apply(ListResponse::for_request(
        &second,
        Err(FetchError::Transport("timeout".into())),
    ));

    let again = list.load_more().unwrap();
    assert_eq!(again.query.page, 2);
}

#[test]
fn retry_without_error_is_noop() {
    let mut list = ListController::new(10);
    assert_eq!(list.retry(), None);
    let req = list.set_query("");
    assert_eq!(list.retry(), None, "in flight");
    list.apply(ok(&req, page_of(1..=10, None)));
    assert_eq!(list.retry(), None, "last fetch succeeded");
}

#[test]
fn failed_first_page_leaves_list_empty() {
    let mut list = ListController::new(10);
    let req = list.set_query("Vader");
    list.apply(ListResponse::for_request(
        &req,
        Err(FetchError::Status { status: 404 }),
    ));

    assert!(list.characters().is_empty());
    assert_eq!(list.error(), Some(&FetchError::Status { status: 404 }));
    assert_eq!(list.page(), 1);
}

#[test]
fn empty_result_page_is_not_an_error() {
    let mut list = ListController::new(10);
    let req = list.set_query("Jar Jar Abrams");
    list.apply(ok(&req, CharacterPage::default()));

    assert!(list.characters().is_empty());
    assert!(list.error().is_none());
    assert!(!list.has_more());
}

// ===== cancel / track =====

#[test]
fn cancel_makes_outstanding_response_stale() {
    let mut list = ListController::new(10);
    let req = list.set_query("");
    list.cancel();

    assert!(!list.is_loading());
    assert_eq!(list.apply(ok(&req, page_of(1..=10, None))), Applied::Stale);
    assert!(list.characters().is_empty());
}

#[tokio::test]
async fn superseding_request_aborts_tracked_task() {
    let mut list = ListController::new(10);
    list.set_query("Lu");
    let task = tokio::spawn(std::future::pending::<()>());
    list.track(task.abort_handle());

    list.set_query("Luke");

    let joined = task.await;
    assert!(joined.unwrap_err().is_cancelled());
}

#[tokio::test]
async fn track_while_idle_aborts_immediately() {
    let mut list = ListController::new(10);
    let task = tokio::spawn(std::future::pending::<()>());
    list.track(task.abort_handle());

    assert!(task.await.unwrap_err().is_cancelled());
}

#[tokio::test]
async fn dropping_controller_aborts_in_flight_task() {
    let mut list = ListController::new(10);
    list.set_query("");
    let task = tokio::spawn(std::future::pending::<()>());
    list.track(task.abort_handle());

    drop(list);

    assert!(task.await.unwrap_err().is_cancelled());
}
