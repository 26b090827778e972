use std::time::Duration;

use nour_core::ai::mock::{MockBehavior, MOCK_REFINEMENT_PREFIX};
use nour_core::audio::WavHeader;
use nour_core::catalog::{Gender, VoiceIdentity, VoiceSelection};
use nour_core::studio::{GenerationError, GenerationRequest, GenerationState, StudioEvent};


fn french_male() -> VoiceSelection {
    VoiceSelection::new("french", Gender::Male)
}

#[test]
fn test_bonjour_le_monde() {
    fixture::run(|mut fixture| async move {
        let (outcome, events) = fixture
            .step(GenerationRequest::new("Bonjour le monde", french_male()))
            .await;
        let result = outcome.unwrap();

        let wav = fixture.studio.store().resolve(&result.audio).unwrap();
        assert_eq!(wav.len(), 48_044);

        let header = WavHeader::parse(wav.as_bytes()).unwrap();
        assert_eq!(header.chunk_size, 48_036);
        assert_eq!(header.audio_format, 1);
        assert_eq!(header.channel_count, 1);
        assert_eq!(header.sample_rate, 24_000);
        assert_eq!(header.byte_rate, 48_000);
        assert_eq!(header.block_align, 2);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.data_size, 48_000);

        let synthesis = fixture.provider().last_synthesis().unwrap();
        assert_eq!(synthesis.voice, VoiceIdentity::Fenrir);
        assert_eq!(
            synthesis.text,
            format!("{MOCK_REFINEMENT_PREFIX}Bonjour le monde")
        );
        assert!(synthesis.performance_note.contains("Language: Français"));

        assert_eq!(result.download_name(), format!("nour-voice-{}.wav", result.id));
        assert!(matches!(
            events.last(),
            Some(StudioEvent::ResultReady { attempt: 1, .. })
        ));
    });
}

#[test]
fn test_refinement_failure_synthesizes_original_text() {
    fixture::run(|mut fixture| async move {
        fixture.set_mock_behavior(MockBehavior::RefinementError);

        let (outcome, events) = fixture
            .step(GenerationRequest::new("Bonjour le monde", french_male()))
            .await;

        let result = outcome.unwrap();
        assert_eq!(result.spoken_text, "Bonjour le monde");
        assert_eq!(
            fixture.provider().last_synthesis().unwrap().text,
            "Bonjour le monde"
        );
        assert!(!events.iter().any(|e| matches!(e, StudioEvent::Failed { .. })));
    });
}

#[test]
fn test_synthesis_failure_reports_and_keeps_nothing() {
    fixture::run(|mut fixture| async move {
        fixture.set_mock_behavior(MockBehavior::NoAudio);

        let (outcome, events) = fixture
            .step(GenerationRequest::new("Bonjour", french_male()))
            .await;

        let err = outcome.unwrap_err();
        assert!(matches!(err, GenerationError::Synthesis(_)));
        assert!(fixture.studio.current().is_none());
        assert!(fixture.studio.store().is_empty());

        let last_state = events.iter().rev().find_map(|e| match e {
            StudioEvent::StateChanged { state, .. } => Some(*state),
            _ => None,
        });
        assert_eq!(last_state, Some(GenerationState::Failed));
        assert!(events.iter().any(|e| matches!(
            e,
            StudioEvent::Failed { message, .. } if message == "Erreur de génération. Réessayez."
        )));
    });
}

#[test]
fn test_new_result_revokes_superseded_audio() {
    fixture::run(|mut fixture| async move {
        let (first, _) = fixture
            .step(GenerationRequest::new("Un", french_male()))
            .await;
        let (second, _) = fixture
            .step(GenerationRequest::new("Deux", french_male()))
            .await;
        let (first, second) = (first.unwrap(), second.unwrap());

        let store = fixture.studio.store();
        assert!(store.resolve(&first.audio).is_none());
        assert!(store.resolve(&second.audio).is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(fixture.studio.current(), Some(second));
    });
}

#[test]
fn test_last_attempt_to_resolve_wins() {
    fixture::run(|fixture| async move {
        fixture.set_mock_behavior(MockBehavior::BehaviorQueue {
            behaviors: vec![
                MockBehavior::Delayed { millis: 200 },
                MockBehavior::Delayed { millis: 10 },
            ],
        });

        let slow = fixture
            .studio
            .generate(GenerationRequest::new("Lent", french_male()).without_refinement());
        let fast = fixture
            .studio
            .generate(GenerationRequest::new("Rapide", french_male()).without_refinement());
        let (slow, fast) = tokio::join!(slow, fast);
        let (slow, fast) = (slow.unwrap(), fast.unwrap());

        let current = fixture.studio.current().unwrap();
        assert_eq!(current.original_text, "Lent");
        assert_eq!(current.id, slow.id);
        assert!(fixture.studio.store().resolve(&fast.audio).is_none());
        assert!(fixture.studio.store().resolve(&slow.audio).is_some());
        assert_eq!(fixture.studio.attempt_count(), 2);
    });
}

#[tokio::test(start_paused = true)]
async fn test_timeout_surfaces_as_synthesis_error() {
    let mut fixture = fixture::Fixture::with_settings(
        MockBehavior::Delayed { millis: 10_000 },
        |settings| settings.request_timeout_secs = 2,
    );

    let started = tokio::time::Instant::now();
    let (outcome, events) = fixture
        .step(GenerationRequest::new("Bonjour", french_male()).without_refinement())
        .await;

    let err = outcome.unwrap_err();
    assert!(matches!(err, GenerationError::Synthesis(_)));
    assert!(err.to_string().contains("timed out after 2 seconds"));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(events.last(), Some(StudioEvent::Failed { attempt: 1, .. })));
}

#[test]
fn test_events_serialize_with_kind_tag() {
    fixture::run(|mut fixture| async move {
        let (_, events) = fixture
            .step(GenerationRequest::new("Bonjour", french_male()))
            .await;

        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["kind"], "StateChanged");
        assert_eq!(json["data"]["state"], "refining");
        assert_eq!(json["data"]["attempt"], 1);
    });
}
