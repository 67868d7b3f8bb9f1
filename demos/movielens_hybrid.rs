//! # Hybrid recommendation walkthrough
//!
//! Builds a small synthetic MovieLens-style world (three taste groups over
//! twelve films), then prints the neighbourhood, both recommendation
//! branches and the blended list for one user.
//!
//! Run with: `cargo run --example movielens_hybrid`

use hybrid_recommender::{
    build_recommender, Catalog, FilterPolicy, ItemId, Movie, RatingRecord, RecommenderConfig,
    UserId,
};

// ── World ────────────────────────────────────────────────────────────────────

const MOVIES: [(&str, &str); 12] = [
    ("Alien (1979)", "Horror|Sci-Fi"),
    ("Aliens (1986)", "Action|Horror|Sci-Fi"),
    ("Blade Runner (1982)", "Action|Sci-Fi|Thriller"),
    ("Terminator, The (1984)", "Action|Sci-Fi|Thriller"),
    ("Notting Hill (1999)", "Comedy|Romance"),
    ("Sleepless in Seattle (1993)", "Comedy|Drama|Romance"),
    ("When Harry Met Sally... (1989)", "Comedy|Romance"),
    ("Pretty Woman (1990)", "Comedy|Romance"),
    ("Airplane! (1980)", "Comedy"),
    ("Naked Gun, The (1988)", "Comedy|Crime"),
    ("Hot Shots! (1991)", "Action|Comedy|War"),
    ("Spaceballs (1987)", "Comedy|Sci-Fi"),
];

/// Deterministic pseudo-random jitter in {-0.5, 0.0, +0.5}.
fn jitter(seed: u32) -> f64 {
    let x = seed.wrapping_mul(2_654_435_761).rotate_left(13);
    f64::from(x % 3) * 0.5 - 0.5
}

fn catalog() -> Catalog {
    Catalog::from_movies(
        MOVIES
            .iter()
            .enumerate()
            .map(|(i, (title, genres))| Movie::from_pipe_genres(ItemId(i as u32), *title, genres)),
    )
}

/// 30 users in three taste groups: sci-fi, romance, spoof comedy.
/// Each user rates the films of their group high and a few others low,
/// leaving gaps for the recommender to fill.
fn ratings() -> Vec<RatingRecord> {
    let mut out = Vec::new();
    for user in 0u32..30 {
        let group = user % 3;
        for item in 0u32..12 {
            let item_group = item / 4;
            // Everyone skips one film from their own group.
            if item_group == group && item % 4 == user % 4 {
                continue;
            }
            // Only rate outside the group every other film.
            if item_group != group && (item + user) % 2 == 0 {
                continue;
            }
            let base = if item_group == group { 4.5 } else { 2.0 };
            let rating = (base + jitter(user * 31 + item)).clamp(0.5, 5.0);
            let timestamp = 1_000_000 + i64::from(user) * 1_000 + i64::from(item);
            out.push(RatingRecord::new(UserId(user), ItemId(item), rating, timestamp));
        }
    }
    out
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let catalog = catalog();
    let config = RecommenderConfig::default().with_min_correlation(0.3);
    let recommender = build_recommender(ratings(), &FilterPolicy::new(5), config)?;

    let target = UserId(4);
    let rec = recommender.recommend_explained(target)?;
    let title = |id: ItemId| catalog.title(id).unwrap_or("<unknown>");

    println!("\n=== Recommendations for user {} ===\n", target);

    println!("Neighbours ({}):", rec.neighbors.len());
    for n in rec.neighbors.iter().take(5) {
        println!("  user {:>3}  r = {:+.3}", n.user, n.correlation);
    }

    match rec.seed {
        Some(seed) => println!("\nSeed film: {}", title(seed)),
        None => println!("\nSeed film: none"),
    }

    println!("\nUser-based:");
    for s in &rec.user_based {
        println!("  {:<32} score {:.3}", title(s.item), s.score);
    }

    println!("\nItem-based:");
    for s in &rec.item_based {
        println!("  {:<32} r = {:+.3}", title(s.item), s.score);
    }

    println!("\nFinal list:");
    for (rank, item) in rec.items.iter().enumerate() {
        println!("  {:>2}. {}", rank + 1, title(*item));
    }

    Ok(())
}
