//! End-to-end scenarios for the hybrid pipeline.
//!
//! The `small_world` fixture is small enough to check by hand:
//!
//! ```text
//!            item:  1    2    3    4    5    6    7
//! user 1 (target)   5    4    2    1    .    .    .
//! user 2            5    4    2    1    5    4    .     corr = 1.0
//! user 3            4    4    2    2    4    .    5     corr ≈ 0.949
//! user 4            1    2    4    5    .    5    .     corr < 0
//! ```

use hybrid_recommender::{
    build_matrix, build_recommender, find_neighbors, recommend, recommend_explained,
    score_by_neighbors, similar_items, FilterPolicy, ItemId, RatingHistory, RatingMatrix,
    RatingRecord, RecommendError, RecommenderConfig, ScoredItem, UserId,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn rec(user: u32, item: u32, rating: f64, ts: i64) -> RatingRecord {
    RatingRecord::new(UserId(user), ItemId(item), rating, ts)
}

fn ids(raw: &[u32]) -> Vec<ItemId> {
    raw.iter().map(|&i| ItemId(i)).collect()
}

fn small_world() -> Vec<RatingRecord> {
    vec![
        rec(1, 1, 5.0, 100), rec(1, 2, 4.0, 200), rec(1, 3, 2.0, 300), rec(1, 4, 1.0, 400),
        rec(2, 1, 5.0, 10), rec(2, 2, 4.0, 11), rec(2, 3, 2.0, 12), rec(2, 4, 1.0, 13),
        rec(2, 5, 5.0, 14), rec(2, 6, 4.0, 15),
        rec(3, 1, 4.0, 20), rec(3, 2, 4.0, 21), rec(3, 3, 2.0, 22), rec(3, 4, 2.0, 23),
        rec(3, 5, 4.0, 24), rec(3, 7, 5.0, 25),
        rec(4, 1, 1.0, 30), rec(4, 2, 2.0, 31), rec(4, 3, 4.0, 32), rec(4, 4, 5.0, 33),
        rec(4, 6, 5.0, 34),
    ]
}

fn world() -> (RatingMatrix, RatingHistory) {
    let history = RatingHistory::from_records(small_world());
    let matrix = build_matrix(&history, &FilterPolicy::keep_all()).unwrap();
    (matrix, history)
}

// ── Neighbour selection ──────────────────────────────────────────────────────

#[test]
fn test_three_user_scenario_returns_only_mirror_user() {
    let history = RatingHistory::from_records([
        rec(1, 1, 5.0, 0), rec(1, 2, 4.0, 0), rec(1, 3, 3.0, 0),
        rec(2, 1, 5.0, 0), rec(2, 2, 4.0, 0), rec(2, 3, 3.0, 0),
        rec(3, 1, 1.0, 0), rec(3, 2, 1.0, 0),
    ]);
    let matrix = build_matrix(&history, &FilterPolicy::keep_all()).unwrap();
    let neighbors = find_neighbors(&matrix, UserId(1), 0.60, 0.65).unwrap();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].user, UserId(2));
    assert_eq!(neighbors[0].correlation, 1.0);
}

#[test]
fn test_small_world_neighbors() {
    let (matrix, _) = world();
    let neighbors = find_neighbors(&matrix, UserId(1), 0.60, 0.65).unwrap();
    let users: Vec<UserId> = neighbors.iter().map(|n| n.user).collect();
    assert_eq!(users, vec![UserId(2), UserId(3)]);
    let expected = 6.0 / 40.0_f64.sqrt();
    assert!((neighbors[1].correlation - expected).abs() < 1e-12);
}

// ── User-based branch ────────────────────────────────────────────────────────

#[test]
fn test_small_world_user_based_scores() {
    let (matrix, history) = world();
    let neighbors = find_neighbors(&matrix, UserId(1), 0.60, 0.65).unwrap();
    let scored = score_by_neighbors(&neighbors, &history, UserId(1), 3.5, 5).unwrap();

    let items: Vec<ItemId> = scored.iter().map(|s| s.item).collect();
    assert_eq!(items, ids(&[7, 5, 6]));

    let c3 = 6.0 / 40.0_f64.sqrt();
    assert!((scored[0].score - c3 * 5.0).abs() < 1e-12);
    assert!((scored[1].score - (5.0 + c3 * 4.0) / 2.0).abs() < 1e-12);
    assert!((scored[2].score - 4.0).abs() < 1e-12);
}

// ── Item-based branch ────────────────────────────────────────────────────────

#[test]
fn test_small_world_similar_items() {
    let (matrix, _) = world();
    let similar = similar_items(&matrix, ItemId(1), 10).unwrap();
    let items: Vec<ItemId> = similar.iter().map(|s| s.item).collect();
    // 7 has a single co-rater with item 1 and is undefined.
    assert_eq!(items, ids(&[1, 5, 2, 3, 4, 6]));
    assert_eq!(similar[0], ScoredItem { item: ItemId(1), score: 1.0 });
    assert_eq!(similar[1].score, 1.0);
    assert_eq!(similar[4].score, -1.0);
    assert_eq!(similar[5].score, -1.0);
}

#[test]
fn test_seed_without_co_raters_returns_only_itself() {
    let history = RatingHistory::from_records([
        rec(1, 1, 5.0, 0), rec(2, 1, 3.0, 0),
        rec(3, 2, 4.0, 0), rec(4, 2, 2.0, 0),
    ]);
    let matrix = build_matrix(&history, &FilterPolicy::keep_all()).unwrap();
    let similar = similar_items(&matrix, ItemId(1), 10).unwrap();
    assert_eq!(similar, vec![ScoredItem { item: ItemId(1), score: 1.0 }]);
}

// ── Hybrid ───────────────────────────────────────────────────────────────────

#[test]
fn test_small_world_hybrid_blend() {
    let (matrix, history) = world();
    let config = RecommenderConfig::default();
    let out = recommend_explained(&matrix, &history, UserId(1), &config).unwrap();

    assert_eq!(out.seed, Some(ItemId(1)));
    assert_eq!(out.user_based.iter().map(|s| s.item).collect::<Vec<_>>(), ids(&[7, 5, 6]));
    assert_eq!(out.item_based.iter().map(|s| s.item).collect::<Vec<_>>(), ids(&[5, 2, 3, 4, 6]));
    assert_eq!(out.items, ids(&[7, 5, 6, 2, 3, 4]));
    assert!(out.items.len() <= config.n_user + config.n_item);
}

#[test]
fn test_smaller_branch_sizes() {
    let (matrix, history) = world();
    let config = RecommenderConfig::default().with_n_user(1).with_n_item(2);
    let items = recommend(&matrix, &history, UserId(1), &config).unwrap();
    assert_eq!(items, ids(&[7, 5, 2]));
}

#[test]
fn test_empty_history_yields_empty_recommendation() {
    let history = RatingHistory::from_records(small_world());
    let mut builder = RatingMatrix::builder();
    builder.user(UserId(99));
    for r in history.records() {
        builder.rate(r.user, r.item, r.rating).unwrap();
    }
    let matrix = builder.build();

    let out = recommend_explained(&matrix, &history, UserId(99), &RecommenderConfig::default())
        .unwrap();
    assert!(out.items.is_empty());
    assert!(out.neighbors.is_empty());
    assert_eq!(out.seed, None);
}

#[test]
fn test_rare_seed_degrades_to_user_based_only() {
    // Target's only 5-star film is rated once; the filter drops it from the matrix.
    let mut records = small_world();
    records.push(rec(1, 50, 5.0, 999));
    let history = RatingHistory::from_records(records);
    let matrix = build_matrix(&history, &FilterPolicy::new(1)).unwrap();

    let out = recommend_explained(&matrix, &history, UserId(1), &RecommenderConfig::default())
        .unwrap();
    assert_eq!(out.seed, Some(ItemId(50)));
    assert!(out.item_based.is_empty());
    assert!(!out.user_based.is_empty());
    assert_eq!(out.items, out.user_based.iter().map(|s| s.item).collect::<Vec<_>>());
}

#[test]
fn test_unknown_user_fails_whole_request() {
    let (matrix, history) = world();
    assert_eq!(
        recommend(&matrix, &history, UserId(404), &RecommenderConfig::default()),
        Err(RecommendError::UnknownUser(UserId(404)))
    );
}

#[test]
fn test_recommend_is_idempotent_and_thread_safe() {
    let recommender = build_recommender(
        small_world(),
        &FilterPolicy::keep_all(),
        RecommenderConfig::default(),
    )
    .unwrap();
    let first = recommender.recommend(UserId(1)).unwrap();
    assert_eq!(first, recommender.recommend(UserId(1)).unwrap());

    std::thread::scope(|s| {
        let handles: Vec<_> = (1..=4)
            .map(|u| {
                let recommender = &recommender;
                s.spawn(move || recommender.recommend(UserId(u)))
            })
            .collect();
        for (u, h) in (1..=4).zip(handles) {
            let out = h.join().unwrap().unwrap();
            assert_eq!(out, recommender.recommend(UserId(u)).unwrap());
        }
    });
}
