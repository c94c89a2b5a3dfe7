//! Property-based tests for the intake dialogue
//!
//! These tests check invariants of the classifier, the engine and the
//! resolvers over generated input.

use super::advisories::resolve_fever;
use super::catalog::TopicCatalog;
use super::classifier::TopicClassifier;
use super::engine::{expected_stage, Advance, DialogueEngine};
use super::session::IntakeSession;
use super::slot::{SlotName, SlotValue, Slots};
use super::stage::DialogueStage;
use super::topic::{Classification, Topic};
use crate::domain::foundation::{SessionId, Timestamp};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn new_session() -> IntakeSession {
    IntakeSession::new(SessionId::new("prop-session").unwrap(), Timestamp::now())
}

fn topic_index(topic: Topic) -> usize {
    Topic::ALL.iter().position(|t| *t == topic).unwrap()
}

/// Every (topic index, keyword) pair of the standard catalog.
fn keyword_table() -> Vec<(usize, String)> {
    TopicCatalog::standard()
        .definitions()
        .iter()
        .enumerate()
        .flat_map(|(i, d)| d.keywords.iter().map(move |k| (i, k.clone())))
        .collect()
}

fn fever_slots(temp: f64, duration: &str) -> Slots {
    let mut slots = Slots::new();
    slots.insert(SlotName::Temperature, SlotValue::Number(temp));
    slots.insert(SlotName::Duration, SlotValue::Text(duration.to_string()));
    slots
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_keyword() -> impl Strategy<Value = (usize, String)> {
    let table = keyword_table();
    (0..table.len()).prop_map(move |i| table[i].clone())
}

/// Filler text that cannot contain a keyword or a digit.
fn arb_filler() -> impl Strategy<Value = String> {
    "[xyzq ]{0,12}"
}

fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("I have a fever".to_string()),
        Just("headache".to_string()),
        Just("bad cough".to_string()),
        Just("stomach ache".to_string()),
        Just("my back hurts".to_string()),
        Just("hello".to_string()),
        Just("severe".to_string()),
        Just("3 days".to_string()),
        (30.0f64..42.0).prop_map(|t| format!("{:.1}", t)),
        "[a-z ]{0,20}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // The winning topic is never later in the table than any topic whose
    // keyword appears in the text.
    #[test]
    fn prop_classifier_prefers_earlier_topics(
        (i, first) in arb_keyword(),
        (j, second) in arb_keyword(),
        pre in arb_filler(),
        mid in arb_filler(),
    ) {
        let text = format!("{}{} {}{}", pre, first, mid, second);
        let classifier = TopicClassifier::default();
        match classifier.classify(&text) {
            Classification::Topic(topic) => {
                prop_assert!(topic_index(topic) <= i.min(j), "{} -> {}", text, topic);
            }
            Classification::Unclassified => prop_assert!(false, "{} unclassified", text),
        }
    }

    // Unreadable answers never change slots, step or the question.
    #[test]
    fn prop_failed_extraction_is_idempotent(
        answers in proptest::collection::vec("[a-zA-Z ]{0,30}", 1..15)
    ) {
        let engine = DialogueEngine::standard(0).unwrap();
        let mut session = new_session();
        let Advance::Ask { question, .. } = engine.advance(&mut session, "fever") else {
            panic!("fever must ask a question");
        };

        for answer in answers {
            let advance = engine.advance(&mut session, &answer);
            match advance {
                Advance::Ask { question: repeated, .. } => prop_assert_eq!(&repeated, &question),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
            prop_assert!(session.slots().is_empty());
            prop_assert_eq!(session.step(), 0);
            prop_assert_eq!(
                session.stage(),
                DialogueStage::AwaitingSlot(SlotName::Temperature)
            );
        }
    }

    // A higher temperature never yields a lower tier.
    #[test]
    fn prop_fever_tier_is_monotonic_in_temperature(
        a in 35.0f64..42.0,
        b in 35.0f64..42.0,
        days in 0u32..10,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let duration = format!("{} days", days);
        let low_tier = resolve_fever(&fever_slots(low, &duration)).tier;
        let high_tier = resolve_fever(&fever_slots(high, &duration)).tier;
        prop_assert!(low_tier <= high_tier, "{} -> {}, {} -> {}", low, low_tier, high, high_tier);
    }

    // A longer moderate fever never yields a lower tier.
    #[test]
    fn prop_fever_tier_is_monotonic_in_days(
        temp in 38.0f64..39.5,
        a in 0u32..30,
        b in 0u32..30,
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let short_tier = resolve_fever(&fever_slots(temp, &format!("{} days", short))).tier;
        let long_tier = resolve_fever(&fever_slots(temp, &format!("{} days", long))).tier;
        prop_assert!(short_tier <= long_tier);
    }

    // Whatever is said, the session stays consistent with the last step.
    #[test]
    fn prop_session_stays_consistent(
        messages in proptest::collection::vec(arb_message(), 1..25)
    ) {
        let engine = DialogueEngine::standard(3).unwrap();
        let mut session = new_session();
        for message in messages {
            let advance = engine.advance(&mut session, &message);
            prop_assert!(session.is_consistent(), "{:?}", session);
            prop_assert_eq!(session.stage(), expected_stage(&advance));
        }
    }

    // "chest pain" in the input always flags the reply.
    #[test]
    fn prop_chest_pain_always_flags(
        prefix in proptest::collection::vec(arb_message(), 0..6),
        pre in "[a-z ]{0,10}",
        post in "[a-z ]{0,10}",
    ) {
        let engine = DialogueEngine::standard(3).unwrap();
        let mut session = new_session();
        for message in prefix {
            engine.advance(&mut session, &message);
        }
        let input = format!("{}chest pain{}", pre, post);
        let advance = engine.advance(&mut session, &input);
        let message = advance.message().unwrap_or_else(|| engine.fallback_message().to_string());
        let response = engine.respond(session.session_id(), &input, &advance, message);
        prop_assert!(response.reply.emergency_flag);
    }
}
