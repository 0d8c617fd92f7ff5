use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use runlytic::models::{
    Difficulty, Marathon, RunningDistance, Terrain, TrainingStats, UserPreferences,
};
use runlytic::services::{ranking, scoring};
use std::hint::black_box;

const WEATHER: [&str; 5] = ["Sunny", "Cloudy", "Rainy", "Cool", "Warm"];

/// Deterministic pool cycling through every distance, difficulty and terrain.
fn pool(size: usize) -> Vec<Marathon> {
    let opens = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..size)
        .map(|i| Marathon {
            id: format!("m{}", i),
            title: format!("Race {}", i),
            location: "Springfield".to_string(),
            image: String::new(),
            description: String::new(),
            start_registration_date: opens,
            end_registration_date: opens + Duration::days(30),
            marathon_start_date: opens + Duration::days(60),
            running_distance: Some(RunningDistance::ALL[i % RunningDistance::ALL.len()]),
            price: (i % 40) as f64 * 10.0,
            difficulty: Some(Difficulty::ALL[i % Difficulty::ALL.len()]),
            terrain: Some(Terrain::ALL[i % Terrain::ALL.len()]),
            weather: Some(WEATHER[i % WEATHER.len()].to_string()),
            total_registrations: (i * 7 % 500) as u32,
            organizer: None,
            created_at: None,
            amenities: Vec::new(),
        })
        .collect()
}

fn benchmark_recommendations(c: &mut Criterion) {
    let prefs = UserPreferences::default();
    let training = TrainingStats {
        average_pace: 5.4,
        ..Default::default()
    };

    let mut group = c.benchmark_group("recommendations");

    for size in [100, 5_000] {
        let marathons = pool(size);

        group.bench_function(format!("score_and_rank_{}", size), |b| {
            b.iter(|| {
                let scores = scoring::score_all(
                    black_box(&prefs),
                    black_box(&marathons),
                    Some(&training),
                );
                ranking::rank(scores, 10)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_recommendations);
criterion_main!(benches);
