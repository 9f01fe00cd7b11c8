// End-to-end play-throughs of `Game` against a recording stage and in-memory storage.
// Native-only: no browser APIs are touched.

use std::collections::BTreeSet;

use holiday_finder::config::{ExpectedOrder, GameConfig, ItemsConfig, OrderRule, ScoringConfig};
use holiday_finder::high_scores::HIGH_SCORES_KEY;
use holiday_finder::{Game, Handle, ItemId, KeyValueStore, MemoryStore, SessionState, Stage, TextStyle};
use rstest::rstest;

#[derive(Default)]
struct RecordingStage {
    next: u32,
    live: BTreeSet<Handle>,
    destroyed: Vec<Handle>,
    texts: Vec<String>,
    bindings: Vec<(Handle, ItemId)>,
}

impl Stage for RecordingStage {
    fn bounds(&self) -> (f64, f64) {
        (600.0, 800.0)
    }

    fn add_image_at(&mut self, _x: f64, _y: f64, _key: &str) -> Handle {
        self.next += 1;
        let h = Handle(self.next);
        self.live.insert(h);
        h
    }

    fn add_text(&mut self, _x: f64, _y: f64, text: &str, _style: TextStyle) -> Handle {
        self.texts.push(text.to_owned());
        self.add_image_at(0.0, 0.0, "")
    }

    fn on_pointer_down(&mut self, handle: Handle, item: ItemId) {
        self.bindings.push((handle, item));
    }

    fn destroy(&mut self, handle: Handle) {
        assert!(self.live.remove(&handle), "{handle:?} destroyed twice");
        self.destroyed.push(handle);
    }
}

fn fixed_three(scoring: ScoringConfig) -> GameConfig {
    GameConfig {
        items: ItemsConfig {
            fixed: Some(vec![[100.0, 100.0], [300.0, 300.0], [500.0, 500.0]]),
            ..Default::default()
        },
        scoring,
        ..Default::default()
    }
}

fn plain_scoring() -> ScoringConfig {
    ScoringConfig {
        points_per: 10,
        target_bonus: false,
        order_bonus: false,
        perfect_multiplier: Some(3),
        expected_order: ExpectedOrder::Placement,
        ..Default::default()
    }
}

fn new_game(config: GameConfig) -> Game<RecordingStage, MemoryStore> {
    Game::new(config, RecordingStage::default(), MemoryStore::new(), 1234)
}

#[test]
fn perfect_game_triples_the_score() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    assert_eq!(game.session().state(), SessionState::Play);
    for id in 0..3 {
        let outcome = game.on_item_clicked(id).unwrap();
        assert_eq!(outcome.delta.points, 10);
    }
    let result = game.last_result().unwrap();
    assert!(result.perfect);
    assert_eq!(result.score, 90);
    assert_eq!(game.session().state(), SessionState::GameOver);
    assert_eq!(game.high_scores(), vec![90]);
}

#[test]
fn out_of_order_game_gets_no_multiplier() {
    let mut game = new_game(fixed_three(ScoringConfig {
        order_bonus: true,
        ..plain_scoring()
    }));
    game.play();
    let points: Vec<u64> = [1, 0, 2]
        .into_iter()
        .map(|id| game.on_item_clicked(id).unwrap().delta.points)
        .collect();
    // only the last click lands on its expected slot
    assert_eq!(points, vec![10, 10, 20]);
    let result = game.last_result().unwrap();
    assert!(!result.perfect);
    assert_eq!(result.score, 40);
}

#[test]
fn last_click_reports_final_score_and_stops_clock() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    game.tick();
    game.tick();
    game.on_item_clicked(2);
    game.on_item_clicked(1);
    let last = game.on_item_clicked(0).unwrap();
    let finished = last.finished.unwrap();
    assert_eq!(finished.elapsed, 2);
    assert!(!game.session().clock_running());
    game.tick();
    assert_eq!(game.session().elapsed(), 2);
    // the frame check must not end the session a second time
    assert_eq!(game.update(), None);
    assert_eq!(game.high_scores(), vec![30]);
}

#[test]
fn repeat_and_stray_clicks_are_ignored() {
    let mut game = new_game(fixed_three(plain_scoring()));
    assert!(game.on_item_clicked(0).is_none(), "clicks before play");
    game.play();
    assert!(game.on_item_clicked(0).is_some());
    assert!(game.on_item_clicked(0).is_none());
    assert!(game.on_item_clicked(42).is_none());
    assert_eq!(game.session().remaining_count(), 2);
    assert_eq!(game.session().score(), 10);
}

#[test]
fn clicked_items_lose_their_handles() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    assert_eq!(game.stage().live.len(), 3);
    assert_eq!(game.stage().bindings.len(), 3);
    game.on_item_clicked(1);
    assert_eq!(game.stage().live.len(), 2);
    assert_eq!(game.live_handle_count(), 2);
}

#[test]
fn restart_resets_everything_and_destroys_handles() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    game.tick();
    game.on_item_clicked(0);
    game.on_item_clicked(1);
    game.on_item_clicked(2);
    assert_eq!(game.session().state(), SessionState::GameOver);

    game.reset();
    assert_eq!(game.session().score(), 0);
    assert_eq!(game.session().elapsed(), 0);
    assert_eq!(game.session().remaining_count(), 0);
    assert_eq!(game.session().target(), None);
    assert!(game.stage().live.is_empty());
    assert!(game.on_item_clicked(0).is_none(), "late event after reset");

    game.play();
    assert_eq!(game.session().state(), SessionState::Play);
    assert_eq!(game.session().remaining_count(), 3);
    assert_eq!(game.stage().live.len(), 3);
}

#[test]
fn reset_mid_game_never_ends_the_session() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    game.on_item_clicked(0);
    game.reset();
    assert_eq!(game.session().state(), SessionState::Start);
    assert_eq!(game.update(), None);
    assert!(game.last_result().is_none());
    assert!(game.high_scores().is_empty());
}

#[test]
fn glow_follows_target_bonus_flag() {
    let mut game = new_game(fixed_three(ScoringConfig {
        target_bonus: true,
        ..plain_scoring()
    }));
    game.play();
    assert!(game.highlighted_target().is_some());
    assert_eq!(game.highlighted_target(), game.session().target());

    let mut plain = new_game(fixed_three(plain_scoring()));
    plain.play();
    assert!(plain.session().target().is_some());
    assert_eq!(plain.highlighted_target(), None);
}

#[test]
fn restart_mid_game_destroys_prior_handles() {
    let mut game = new_game(fixed_three(plain_scoring()));
    game.play();
    let first: BTreeSet<Handle> = game.stage().live.clone();
    game.on_item_clicked(0);
    game.restart();
    assert_eq!(game.session().score(), 0);
    assert_eq!(game.session().remaining_count(), 3);
    assert!(game.stage().live.is_disjoint(&first));
    assert_eq!(game.stage().destroyed.len(), 3);
}

#[test]
fn target_bonus_pays_bonus_and_moves_target() {
    let mut game = new_game(fixed_three(ScoringConfig {
        target_bonus: true,
        bonus_pts_modifier: 5,
        ..plain_scoring()
    }));
    game.play();
    let target = game.session().target().unwrap();
    let outcome = game.on_item_clicked(target).unwrap();
    assert!(outcome.delta.hit_target);
    assert_eq!(outcome.delta.points, 50);
    let next = outcome.new_target.unwrap();
    assert_ne!(next, target);
    assert!(game.session().registry().is_unfound(next));
}

#[test]
fn empty_word_list_ends_on_next_frame() {
    let config = GameConfig {
        items: ItemsConfig {
            words: Some(vec![]),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut game = new_game(config);
    game.play();
    assert_eq!(game.session().state(), SessionState::Play);
    assert_eq!(game.session().target(), None);
    let result = game.update().unwrap();
    assert_eq!(result.score, 0);
    assert!(!result.perfect, "nothing was clicked");
    assert_eq!(game.session().state(), SessionState::GameOver);
    assert_eq!(game.update(), None);
}

#[test]
fn word_mode_labels_items() {
    let config = GameConfig {
        items: ItemsConfig {
            token_string: Some("I Love You!".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut game = new_game(config);
    game.play();
    assert_eq!(game.stage().texts, vec!["I", "Love", "You!"]);
    assert_eq!(game.live_handle_count(), 6);
    game.on_item_clicked(1);
    assert_eq!(game.live_handle_count(), 4);
    let labels: Vec<_> = game
        .session()
        .items()
        .iter()
        .map(|i| i.label.clone().unwrap())
        .collect();
    assert_eq!(labels, vec!["I", "Love", "You!"]);
}

#[rstest]
#[case(ExpectedOrder::None, None)]
#[case(ExpectedOrder::Placement, Some(vec![0, 1, 2]))]
fn expected_order_source(#[case] source: ExpectedOrder, #[case] expected: Option<Vec<ItemId>>) {
    let mut game = new_game(fixed_three(ScoringConfig {
        expected_order: source,
        ..plain_scoring()
    }));
    game.play();
    assert_eq!(game.session().expected_order().map(<[_]>::to_vec), expected);
}

#[test]
fn shuffled_order_is_a_permutation() {
    let mut game = new_game(fixed_three(ScoringConfig {
        expected_order: ExpectedOrder::Shuffled,
        ..plain_scoring()
    }));
    game.play();
    let mut order = game.session().expected_order().unwrap().to_vec();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2]);
}

#[rstest]
#[case(OrderRule::ClickRank, 0, 20)]
#[case(OrderRule::Elapsed, 0, 20)]
#[case(OrderRule::Elapsed, 1, 10)]
fn order_rule_decides_first_click_bonus(
    #[case] rule: OrderRule,
    #[case] ticks: usize,
    #[case] points: u64,
) {
    let mut game = new_game(fixed_three(ScoringConfig {
        order_bonus: true,
        order_rule: rule,
        ..plain_scoring()
    }));
    game.play();
    for _ in 0..ticks {
        game.tick();
    }
    assert_eq!(game.on_item_clicked(0).unwrap().delta.points, points);
}

#[test]
fn high_scores_accumulate_across_sessions() {
    let mut game = new_game(GameConfig {
        high_score_count: 2,
        ..fixed_three(plain_scoring())
    });
    for order in [[0, 1, 2], [2, 1, 0], [1, 0, 2]] {
        game.play();
        for id in order {
            game.on_item_clicked(id);
        }
    }
    // perfect 90, then two 30s; capacity 2
    assert_eq!(game.high_scores(), vec![90, 30]);
}

#[test]
fn malformed_persisted_scores_are_replaced() {
    let mut store = MemoryStore::new();
    store.set_item(HIGH_SCORES_KEY, "definitely not json").unwrap();
    let mut game = Game::new(
        fixed_three(plain_scoring()),
        RecordingStage::default(),
        store,
        7,
    );
    assert!(game.high_scores().is_empty());
    game.play();
    for id in 0..3 {
        game.on_item_clicked(id);
    }
    assert_eq!(game.high_scores(), vec![90]);
}
