//! Search behavior through the page controller: debounce timing,
//! supersession, blank queries, and the fixed scenarios.

use std::time::Duration;

use proptest::prelude::*;
use treasure_core::view::ResultsView;
use treasure_core::{Cmd, Msg, PageConfig, TREASURE_NOTES, TreasurePage, matching_records};

const DELAY: Duration = Duration::from_millis(500);

fn page() -> TreasurePage {
    let cfg = PageConfig {
        seed: Some(1),
        ..PageConfig::default()
    };
    TreasurePage::new(cfg, 800.0, 600.0, 0)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn oak_finds_the_river() {
    let mut p = page();
    p.update(Msg::Input("дуб".into()), ms(0));
    assert!(p.poll(DELAY));
    let results = p.search().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location, "Река Светлая");
    assert!(!p.search().is_loading());
}

#[test]
fn nonsense_shows_empty_state() {
    let mut p = page();
    p.update(Msg::Input("zzz".into()), ms(0));
    p.poll(DELAY);
    assert!(p.search().results().is_empty());
    assert_eq!(p.view().results, ResultsView::Empty);
}

#[test]
fn clearing_after_search_has_no_loading_flash() {
    let mut p = page();
    p.update(Msg::Input("холм".into()), ms(0));
    p.poll(DELAY);
    assert_eq!(p.search().results().len(), 1);

    p.update(Msg::Input(String::new()), ms(1_000));
    // Checked before any time passes.
    assert!(p.search().results().is_empty());
    assert!(!p.search().is_loading());
    assert_eq!(p.view().results, ResultsView::Idle);
}

#[test]
fn late_timer_for_old_query_is_ignored() {
    let mut p = page();
    let cmd = p.update(Msg::Input("дуб".into()), ms(0));
    let Cmd::ScheduleSearch { ticket: old, .. } = cmd else {
        panic!("expected a scheduled search");
    };
    p.update(Msg::Input("мельница".into()), ms(100));

    // Host forgot to cancel the old timer; it fires anyway.
    p.update(Msg::SearchDue(old), ms(500));
    assert!(p.search().is_loading());
    assert!(p.search().results().is_empty());

    assert!(p.poll(ms(600)));
    assert_eq!(p.search().results().len(), 1);
    assert_eq!(p.search().results()[0].location, "Холм Мечтаний");
}

#[test]
fn results_for_every_single_word_are_subsequences() {
    for record in &TREASURE_NOTES {
        for word in record.note.split_whitespace() {
            let hits = matching_records(word);
            assert!(hits.contains(record), "{word:?} must find its own note");
            let positions: Vec<usize> = hits
                .iter()
                .map(|h| TREASURE_NOTES.iter().position(|r| r == h).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

proptest! {
    #[test]
    fn blank_queries_clear_immediately(spaces in "[ \t\n]{0,8}", prior in "[а-я]{1,5}") {
        let mut p = page();
        p.update(Msg::Input(prior), ms(0));
        p.poll(DELAY);
        p.update(Msg::Input(spaces), ms(2_000));
        prop_assert!(p.search().results().is_empty());
        prop_assert!(!p.search().is_loading());
        prop_assert_eq!(p.search().pending_ticket(), None);
    }

    #[test]
    fn delayed_results_match_case_insensitive_filter(query in "[а-яА-Яa-z ]{1,6}") {
        prop_assume!(!query.trim().is_empty());
        let mut p = page();
        p.update(Msg::Input(query.clone()), ms(0));
        prop_assert!(p.search().is_loading());
        p.poll(DELAY);
        prop_assert!(!p.search().is_loading());

        let needle = query.to_lowercase();
        let expected: Vec<_> = TREASURE_NOTES
            .iter()
            .filter(|r| r.note.to_lowercase().contains(&needle))
            .copied()
            .collect();
        prop_assert_eq!(p.search().results(), expected.as_slice());
    }

    #[test]
    fn only_the_last_query_wins(
        edits in prop::collection::vec(("[а-я]{1,4}", 0u64..499), 1..6),
    ) {
        let mut p = page();
        let mut now = 0u64;
        let mut tickets = Vec::new();
        for (text, gap) in &edits {
            now += gap;
            p.update(Msg::Input(text.clone()), ms(now));
            if let Some(t) = p.search().pending_ticket()
                && tickets.last() != Some(&t)
            {
                tickets.push(t);
            }
        }
        // Fire every stale ticket out of order; none may apply.
        for t in tickets.iter().rev().skip(1) {
            p.update(Msg::SearchDue(*t), ms(now));
            prop_assert!(p.search().is_loading());
        }
        p.poll(ms(now) + DELAY);
        let last = &edits.last().unwrap().0;
        prop_assert_eq!(p.search().query(), last.as_str());
        let expected = matching_records(last);
        prop_assert_eq!(p.search().results(), expected.as_slice());
    }
}
