// Service-level tests against the in-memory adapters

use std::sync::Arc;

use haven_match::config::MatchingSettings;
use haven_match::models::{AxisScore, MatchQuery, PersonalityProfile, PreferenceBreakdown, UserAttributes};
use haven_match::services::{InMemoryMatchStore, InMemoryProfiles, MatchError, MatchService};

fn profile(id: &str, type_code: &str, overall: f64) -> PersonalityProfile {
    PersonalityProfile {
        user_id: id.to_string(),
        type_code: type_code.to_string(),
        overall_score: overall,
        preference_alignment: 75.0,
        breakdown: PreferenceBreakdown {
            ei: AxisScore::new("Introversion", 70.0),
            sn: AxisScore::new("Intuition", 60.0),
            tf: AxisScore::new("Thinking", 55.0),
            jp: AxisScore::new("Judging", 65.0),
        },
        trait_scores: [("Creativity".to_string(), 80.0)].into_iter().collect(),
        created_at: None,
    }
}

fn attributes(id: &str, age: u8, gender: &str, coords: Option<(f64, f64)>) -> UserAttributes {
    UserAttributes {
        user_id: id.to_string(),
        first_name: format!("First-{}", id),
        last_name: format!("Last-{}", id),
        age,
        gender: gender.to_string(),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        image_file_ids: vec![],
    }
}

async fn service_with(
    profiles: Vec<PersonalityProfile>,
    attrs: Vec<UserAttributes>,
    settings: MatchingSettings,
) -> MatchService {
    let repo = InMemoryProfiles::new();
    for p in profiles {
        repo.insert_profile(p).await;
    }
    for a in attrs {
        repo.insert_attributes(a).await;
    }
    MatchService::new(Arc::new(repo), Arc::new(InMemoryMatchStore::new()), &settings)
}

#[tokio::test]
async fn test_compute_without_profile_is_not_found() {
    let service = service_with(vec![], vec![], MatchingSettings::default()).await;

    let err = service.compute("ghost").await.unwrap_err();
    assert!(matches!(err, MatchError::ProfileNotFound(_)));
}

#[tokio::test]
async fn test_compute_with_no_candidates_yields_empty_record() {
    let service = service_with(
        vec![profile("solo", "INTJ", 80.0)],
        vec![],
        MatchingSettings::default(),
    )
    .await;

    let summary = service.compute("solo").await.unwrap();
    assert!(summary.matches.is_empty());
    assert_eq!(summary.total_matches, 0);

    // The record exists: retrieval finds an empty page, not RecordNotFound.
    let page = service.retrieve("solo", &MatchQuery::default()).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.matches.is_empty());
}

#[tokio::test]
async fn test_retrieve_before_compute_is_not_found() {
    let service = service_with(
        vec![profile("u1", "INTJ", 80.0)],
        vec![],
        MatchingSettings::default(),
    )
    .await;

    let err = service
        .retrieve("u1", &MatchQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::RecordNotFound(_)));
}

#[tokio::test]
async fn test_round_trip_preserves_order() {
    // Same-type profiles with identical axes and traits: score is
    // 80 + 0.2 * (100 - |overall diff|), so ordering tracks overall
    // proximity to the requester's 80.
    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("near", "INTJ", 82.0),
            profile("close", "INTJ", 75.0),
            profile("far", "INTJ", 40.0),
        ],
        vec![
            attributes("near", 25, "female", None),
            attributes("close", 28, "male", None),
            attributes("far", 31, "female", None),
        ],
        MatchingSettings::default(),
    )
    .await;

    let summary = service.compute("me").await.unwrap();
    let computed: Vec<&str> = summary.matches.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(computed, vec!["near", "close", "far"]);

    let page = service
        .retrieve(
            "me",
            &MatchQuery {
                limit: 100,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let retrieved: Vec<&str> = page
        .matches
        .iter()
        .map(|m| m.matched_user_id.as_str())
        .collect();
    assert_eq!(retrieved, computed);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_total_matches_comes_from_pairing_not_list() {
    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("c1", "INTJ", 80.0),
            profile("c2", "INTJ", 80.0),
            profile("c3", "INTJ", 80.0),
        ],
        vec![],
        MatchingSettings::default(),
    )
    .await;

    let summary = service.compute("me").await.unwrap();
    assert_eq!(summary.matches.len(), 3);
    assert!(summary.total_matches as usize <= summary.matches.len());
}

#[tokio::test]
async fn test_recompute_replaces_record_wholesale() {
    let repo = InMemoryProfiles::new();
    repo.insert_profile(profile("me", "INTJ", 80.0)).await;
    repo.insert_profile(profile("old", "INTJ", 80.0)).await;
    repo.insert_attributes(attributes("old", 25, "female", None)).await;
    repo.insert_attributes(attributes("new", 25, "female", None)).await;
    let repo = Arc::new(repo);
    let service = MatchService::new(
        repo.clone(),
        Arc::new(InMemoryMatchStore::new()),
        &MatchingSettings::default(),
    );

    service.compute("me").await.unwrap();

    // The old candidate disappears from the platform; a new one shows up.
    repo.insert_profile(profile("new", "INTJ", 82.0)).await;
    let mut gone = profile("old", "ESFP", 10.0);
    gone.breakdown.ei = AxisScore::new("Extraversion", 10.0);
    gone.breakdown.sn = AxisScore::new("Sensing", 10.0);
    gone.breakdown.tf = AxisScore::new("Feeling", 10.0);
    gone.breakdown.jp = AxisScore::new("Perceiving", 10.0);
    repo.insert_profile(gone).await;

    service.compute("me").await.unwrap();

    let page = service.retrieve("me", &MatchQuery::default()).await.unwrap();
    let ids: Vec<&str> = page
        .matches
        .iter()
        .map(|m| m.matched_user_id.as_str())
        .collect();
    assert_eq!(ids, vec!["new"]);
}

#[tokio::test]
async fn test_min_similarity_filter() {
    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("strong", "INTJ", 80.0), // scores 100
            profile("weak", "INTJ", 10.0),   // scores 86
        ],
        vec![
            attributes("strong", 25, "female", None),
            attributes("weak", 25, "female", None),
        ],
        MatchingSettings::default(),
    )
    .await;

    service.compute("me").await.unwrap();

    let page = service
        .retrieve(
            "me",
            &MatchQuery {
                min_similarity: 90.0,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.matches[0].matched_user_id, "strong");
}

#[tokio::test]
async fn test_age_and_gender_filters() {
    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("young-f", "INTJ", 80.0),
            profile("old-f", "INTJ", 80.0),
            profile("young-m", "INTJ", 80.0),
        ],
        vec![
            attributes("young-f", 22, "female", None),
            attributes("old-f", 45, "female", None),
            attributes("young-m", 23, "male", None),
        ],
        MatchingSettings::default(),
    )
    .await;

    service.compute("me").await.unwrap();

    let page = service
        .retrieve(
            "me",
            &MatchQuery {
                min_age: Some(20),
                max_age: Some(30),
                gender: Some("female".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.matches[0].matched_user_id, "young-f");
}

#[tokio::test]
async fn test_unresolved_reference_is_excluded_not_an_error() {
    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("resolved", "INTJ", 80.0),
            profile("orphan", "INTJ", 80.0),
        ],
        // No attributes seeded for "orphan".
        vec![attributes("resolved", 25, "female", None)],
        MatchingSettings::default(),
    )
    .await;

    service.compute("me").await.unwrap();

    let page = service.retrieve("me", &MatchQuery::default()).await.unwrap();
    let ids: Vec<&str> = page
        .matches
        .iter()
        .map(|m| m.matched_user_id.as_str())
        .collect();
    assert_eq!(ids, vec!["resolved"]);

    // Still excluded when a gender filter is in play.
    let page = service
        .retrieve(
            "me",
            &MatchQuery {
                gender: Some("female".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_distance_filter_and_missing_coordinates() {
    let kathmandu = (27.7172, 85.3240);
    let patan = (27.6710, 85.3188);
    let pokhara = (28.2096, 83.9856);

    let service = service_with(
        vec![
            profile("me", "INTJ", 80.0),
            profile("nearby", "INTJ", 80.0),
            profile("distant", "INTJ", 80.0),
            profile("nowhere", "INTJ", 80.0),
        ],
        vec![
            attributes("me", 30, "male", Some(kathmandu)),
            attributes("nearby", 25, "female", Some(patan)),
            attributes("distant", 25, "female", Some(pokhara)),
            attributes("nowhere", 25, "female", None),
        ],
        MatchingSettings::default(),
    )
    .await;

    service.compute("me").await.unwrap();

    let page = service
        .retrieve(
            "me",
            &MatchQuery {
                max_distance_km: Some(50.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let ids: Vec<&str> = page
        .matches
        .iter()
        .map(|m| m.matched_user_id.as_str())
        .collect();
    assert_eq!(ids, vec!["nearby"]);
    assert!(page.matches[0].distance_km.unwrap() < 10.0);

    // Without the distance cap, missing coordinates are irrelevant.
    let page = service.retrieve("me", &MatchQuery::default()).await.unwrap();
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_invalid_filters_rejected_before_store() {
    let service = service_with(vec![], vec![], MatchingSettings::default()).await;

    // No record exists for this user; a valid query would be RecordNotFound,
    // so getting InvalidFilter proves validation ran first.
    for query in [
        MatchQuery {
            min_similarity: 150.0,
            ..Default::default()
        },
        MatchQuery {
            page: 0,
            ..Default::default()
        },
        MatchQuery {
            limit: 0,
            ..Default::default()
        },
        MatchQuery {
            min_age: Some(40),
            max_age: Some(20),
            ..Default::default()
        },
    ] {
        let err = service.retrieve("anyone", &query).await.unwrap_err();
        assert!(matches!(err, MatchError::InvalidFilter(_)), "{:?}", err);
    }
}

#[tokio::test]
async fn test_pagination_skips_and_caps() {
    let mut profiles = vec![profile("me", "INTJ", 80.0)];
    let mut attrs = vec![];
    for i in 0..7 {
        let id = format!("c{}", i);
        // Spread overall scores so similarities are distinct.
        profiles.push(profile(&id, "INTJ", 60.0 + i as f64 * 2.0));
        attrs.push(attributes(&id, 25, "female", None));
    }
    let service = service_with(profiles, attrs, MatchingSettings::default()).await;

    service.compute("me").await.unwrap();

    let first = service
        .retrieve(
            "me",
            &MatchQuery {
                limit: 3,
                page: 1,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let second = service
        .retrieve(
            "me",
            &MatchQuery {
                limit: 3,
                page: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let third = service
        .retrieve(
            "me",
            &MatchQuery {
                limit: 3,
                page: 3,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(first.matches.len(), 3);
    assert_eq!(second.matches.len(), 3);
    assert_eq!(third.matches.len(), 1);
    assert_eq!(first.total, 7);
    assert_eq!(first.total_pages, 3);

    // Pages never overlap and stay globally sorted.
    let mut all: Vec<f64> = first
        .matches
        .iter()
        .chain(second.matches.iter())
        .chain(third.matches.iter())
        .map(|m| m.similarity_score)
        .collect();
    assert_eq!(all.len(), 7);
    let sorted = {
        let mut copy = all.clone();
        copy.sort_by(|a, b| b.partial_cmp(a).unwrap());
        copy
    };
    assert_eq!(all, sorted);
    all.dedup();
    assert_eq!(all.len(), 7);
}
