//! Property-based tests for timing, normalization and pagination invariants.
//!
//! Tests validate:
//! 1. The debouncer emits exactly the values followed by a quiet interval
//! 2. List envelopes are read from `results`, then `result`, else empty
//! 3. Uid constructors reject blank strings
//! 4. Accumulated pages keep server order and the cursor tracks pages loaded
//! 5. Responses to a superseded query never touch the results

use holocron::api::envelope::{extract_summaries, normalize_page};
use holocron::model::{CharacterPage, CharacterSummary, Uid};
use holocron::state::{Applied, Debouncer, ListController, ListResponse};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(500);

fn items(names: &[String]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "uid": (i + 1).to_string(), "name": name, "url": "" }))
            .collect(),
    )
}

fn names(summaries: &[CharacterSummary]) -> Vec<String> {
    summaries.iter().map(|s| s.name.clone()).collect()
}

fn page(start: usize, len: usize, next: bool) -> CharacterPage {
    CharacterPage {
        characters: (start..start + len)
            .map(|i| CharacterSummary::new(Uid::new((i + 1).to_string()).unwrap(), format!("c{i}"), ""))
            .collect(),
        next: next.then(|| "more".to_string()),
        ..CharacterPage::default()
    }
}

// ===== Property 1: Debouncer =====

proptest! {
    /// Push values separated by arbitrary gaps, polling just before each push.
    /// A value is emitted iff the gap after it reaches the delay, or it is last.
    #[test]
    fn debouncer_emits_only_settled_values(gaps in prop::collection::vec(0u64..1200, 1..40)) {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let mut emitted = Vec::new();
        let mut now = start;

        for (value, gap) in gaps.iter().enumerate() {
            if let Some(v) = debouncer.poll(now) {
                emitted.push(v);
            }
            debouncer.push(value, now);
            now += Duration::from_millis(*gap);
        }
        // Long after the final push everything pending has settled.
        if let Some(v) = debouncer.poll(now + DELAY) {
            emitted.push(v);
        }

        let expected: Vec<usize> = (0..gaps.len())
            .filter(|&i| i == gaps.len() - 1 || Duration::from_millis(gaps[i]) >= DELAY)
            .collect();
        prop_assert_eq!(emitted, expected);
        prop_assert!(!debouncer.is_pending());
    }

    #[test]
    fn debouncer_never_emits_before_deadline(offset in 0u64..500) {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("luke", start);
        prop_assert_eq!(debouncer.poll(start + Duration::from_millis(offset)), None);
        prop_assert_eq!(debouncer.deadline(), Some(start + DELAY));
    }
}

// ===== Property 2: Envelope normalization =====

proptest! {
    #[test]
    fn results_array_wins_over_result(
        primary in prop::collection::vec("[A-Za-z ]{1,12}", 0..8),
        fallback in prop::collection::vec("[A-Za-z ]{1,12}", 1..8),
    ) {
        let value = json!({ "results": items(&primary), "result": items(&fallback) });
        prop_assert_eq!(names(&extract_summaries(&value)), primary);
    }

    #[test]
    fn result_array_used_when_results_absent(
        list in prop::collection::vec("[A-Za-z ]{1,12}", 0..8),
    ) {
        let value = json!({ "result": items(&list) });
        prop_assert_eq!(names(&extract_summaries(&value)), list);
    }

    #[test]
    fn non_array_payloads_yield_nothing(text in ".*", number in any::<i64>()) {
        for value in [
            json!({}),
            json!({ "results": text.clone() }),
            json!({ "result": { "uid": "1", "properties": { "name": text.clone() } } }),
            json!({ "results": number, "result": null }),
        ] {
            prop_assert!(extract_summaries(&value).is_empty());
        }
    }

    #[test]
    fn next_presence_drives_has_next(next in prop::option::of("[a-z:/?=0-9]{1,20}")) {
        let value = json!({ "results": [], "next": next.clone() });
        prop_assert_eq!(normalize_page(&value).has_next(), next.is_some());
    }
}

// ===== Property 3: Uid =====

proptest! {
    #[test]
    fn uid_rejects_blank(s in "[ \t\n]*") {
        prop_assert!(Uid::new(s).is_err(), "Blank uid should be rejected");
    }

    #[test]
    fn uid_keeps_trimmed_value(s in "[0-9]{1,6}", pad in "[ ]{0,3}") {
        let uid = Uid::new(format!("{pad}{s}{pad}")).unwrap();
        prop_assert_eq!(uid.as_str(), s.as_str());
    }
}

// ===== Property 4 and 5: List controller =====

proptest! {
    #[test]
    fn accumulated_pages_keep_order(sizes in prop::collection::vec(1usize..10, 1..6)) {
        let mut list = ListController::new(10);
        let mut request = list.set_query("");
        let mut offset = 0;

        for (i, &len) in sizes.iter().enumerate() {
            let last = i == sizes.len() - 1;
            let applied = list.apply(ListResponse::for_request(&request, Ok(page(offset, len, !last))));
            prop_assert_eq!(applied, Applied::Current);
            offset += len;
            prop_assert_eq!(list.page() as usize, i + 1);
            prop_assert_eq!(list.has_more(), !last);
            if !last {
                request = list.load_more().unwrap();
            }
        }

        let expected: Vec<String> = (0..offset).map(|i| format!("c{i}")).collect();
        prop_assert_eq!(names(list.characters()), expected);
        prop_assert!(list.load_more().is_none());
    }

    #[test]
    fn superseded_query_responses_are_discarded(
        queries in prop::collection::vec("[a-z]{0,6}", 2..6),
        late in any::<prop::sample::Index>(),
    ) {
        let mut list = ListController::new(10);
        let requests: Vec<_> = queries.iter().map(|q| list.set_query(q.clone())).collect();
        let current = requests.last().unwrap();

        // Any earlier request's answer is stale and leaves the state untouched.
        let stale = &requests[late.index(requests.len() - 1)];
        let applied = list.apply(ListResponse::for_request(stale, Ok(page(0, 5, true))));
        prop_assert_eq!(applied, Applied::Stale);
        prop_assert!(list.characters().is_empty());
        prop_assert!(list.is_loading());

        let applied = list.apply(ListResponse::for_request(current, Ok(page(0, 3, false))));
        prop_assert_eq!(applied, Applied::Current);
        prop_assert_eq!(list.characters().len(), 3);
        prop_assert_eq!(list.query(), queries.last().unwrap().as_str());
    }
}
