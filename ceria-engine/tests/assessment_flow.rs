//! End-to-end flow: normalize telemetry, aggregate it, and read the
//! dashboard snapshots back the way the presentation layer does.

use ceria_engine::{
    AssessmentEngine, DevelopmentLevel, Difficulty, DomainCode, GameKind, SessionRecord,
    TestKind, TestUpdate, normalize,
};
use chrono::{DateTime, TimeZone, Utc};

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, minute, 0)
        .single()
        .expect("valid fixture date")
}

#[test]
fn rounds_flow_from_normalizer_to_dashboard() {
    let mut engine = AssessmentEngine::default();

    // A game collaborator finishes three rounds of increasing quality.
    let rounds = [(110u32, 3u32, 1u32), (80, 1, 0), (45, 0, 0)];
    for (i, (time_spent, errors, hints)) in rounds.into_iter().enumerate() {
        let weights = engine.weights_for(GameKind::PatternRecognition).clone();
        let normalized = normalize(time_spent, errors, hints, Difficulty::Medium, &weights);
        let minute = u32::try_from(i).unwrap_or(0);
        let session = SessionRecord::new(
            at(minute),
            time_spent,
            errors,
            normalized.score,
            Difficulty::Medium,
            hints,
        )
        .expect("normalized score is in range");
        engine
            .record_session("patternRecognition", session)
            .expect("known game type");
    }

    let stats = engine
        .domain_stats(DomainCode::Gv)
        .expect("registry domain");
    assert_eq!(stats.total_played, 3);
    assert_eq!(stats.history.len(), 3);
    assert!(stats.best_score >= stats.average_score);
    assert_eq!(stats.last_played, Some(at(2)));

    // Untouched domains stay zeroed.
    let idle = engine
        .domain_stats(DomainCode::Ga)
        .expect("registry domain");
    assert_eq!(idle.total_played, 0);
    assert_eq!(idle.development_level, DevelopmentLevel::PerluPerhatianLebih);

    // The first round unlocked badges; the UI drains the single slot.
    assert!(engine.take_notification().is_some());
    assert!(engine.take_notification().is_none());
    assert!(!engine.achievements().earned().is_empty());
}

#[test]
fn one_shot_tests_live_beside_game_aggregates() {
    let mut engine = AssessmentEngine::default();

    let narrow = DomainCode::Gc
        .narrow_abilities()
        .into_iter()
        .map(|ability| (ability.to_string(), 8u32))
        .collect();
    engine
        .record_test_completion_at(
            "linguistic",
            TestUpdate {
                score: Some(24),
                total: Some(30),
                time_spent_secs: Some(420),
                narrow_ability_scores: Some(narrow),
                recommendations: Some(vec![
                    "Perbanyak membaca cerita bergambar".to_string(),
                ]),
                ..TestUpdate::default()
            },
            at(0),
        )
        .expect("known test domain");

    let result = engine
        .test_result(TestKind::Linguistic)
        .expect("registry test");
    assert!(result.completed);
    assert!((result.percentage - 80.0).abs() < f64::EPSILON);
    assert_eq!(result.development_level, DevelopmentLevel::Baik);
    assert_eq!(result.narrow_ability_scores.len(), 3);

    // Game aggregates are untouched by test completions.
    assert!(
        engine
            .all_domain_stats()
            .all(|(_, stats)| stats.total_played == 0)
    );
}
