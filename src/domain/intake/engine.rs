//! Dialogue engine: one synchronous step of the intake conversation.
//!
//! The engine owns the closed topic catalog and the pure components
//! (classifier, extractor, selector, emergency detector). It mutates an
//! [`IntakeSession`] in place and reports what happened as an [`Advance`];
//! loading, persisting and notifying are left to the async orchestrator.

use tracing::{debug, info, warn};

use super::advisories::{Advisory, FALLBACK_MESSAGE, RETRY_EXHAUSTED_MESSAGE};
use super::catalog::{CatalogError, TopicCatalog, TopicDefinition};
use super::classifier::TopicClassifier;
use super::emergency::{EmergencyDetector, EmergencyScan};
use super::extractor::{Extraction, SlotExtractor};
use super::inquiry::KnowledgeQuery;
use super::reply::{Reply, ReplyAction};
use super::selector::{ResponseSelector, Selection};
use super::session::IntakeSession;
use super::slot::SlotName;
use super::stage::DialogueStage;
use super::tier::Tier;
use super::topic::{Classification, Topic};
use crate::domain::foundation::SessionId;

/// Default number of consecutive unreadable answers before a topic is dropped.
pub const DEFAULT_MAX_SLOT_RETRIES: u32 = 5;

/// Result of feeding one message to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// No topic matched. The session was not touched.
    Unclassified { inquiry: Option<KnowledgeQuery> },
    /// A slot question, either for a newly entered slot or asked again.
    Ask {
        topic: Topic,
        slot: SlotName,
        question: String,
        reprompt: bool,
    },
    /// Every required slot is filled and the topic is closed.
    Resolved { topic: Topic, advisory: Advisory },
    /// The retry cap was reached and the topic was dropped.
    Abandoned { topic: Topic },
}

impl Advance {
    /// Message for this step, if the engine can produce it on its own.
    ///
    /// `None` for unclassified input, whose reply comes from the knowledge
    /// source or the fallback.
    pub fn message(&self) -> Option<String> {
        match self {
            Advance::Unclassified { .. } => None,
            Advance::Ask { question, .. } => Some(question.clone()),
            Advance::Resolved { advisory, .. } => Some(advisory.message.clone()),
            Advance::Abandoned { .. } => Some(RETRY_EXHAUSTED_MESSAGE.to_string()),
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        match self {
            Advance::Unclassified { .. } => None,
            Advance::Ask { topic, .. }
            | Advance::Resolved { topic, .. }
            | Advance::Abandoned { topic } => Some(*topic),
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Advance::Resolved { advisory, .. } => Some(advisory.tier),
            _ => None,
        }
    }

    pub fn closes_topic(&self) -> bool {
        matches!(self, Advance::Resolved { .. } | Advance::Abandoned { .. })
    }
}

/// A reply plus the emergency keywords that flagged it.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub reply: Reply,
    pub scan: EmergencyScan,
}

#[derive(Debug, Clone)]
pub struct DialogueEngine {
    catalog: TopicCatalog,
    classifier: TopicClassifier,
    extractor: SlotExtractor,
    selector: ResponseSelector,
    detector: EmergencyDetector,
    max_slot_retries: u32,
}

impl DialogueEngine {
    /// Builds an engine, refusing catalogs with gaps.
    ///
    /// Every topic the classifier can produce must have a definition.
    /// `max_slot_retries` of 0 disables the retry cap.
    pub fn new(
        catalog: TopicCatalog,
        classifier: TopicClassifier,
        max_slot_retries: u32,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        if let Some(missing) = classifier
            .topics()
            .find(|topic| catalog.definition(*topic).is_none())
        {
            return Err(CatalogError::MissingDefinition(missing));
        }

        Ok(Self {
            catalog,
            classifier,
            extractor: SlotExtractor::new(),
            selector: ResponseSelector::new(),
            detector: EmergencyDetector::new(),
            max_slot_retries,
        })
    }

    /// Engine over the built-in catalog.
    pub fn standard(max_slot_retries: u32) -> Result<Self, CatalogError> {
        let catalog = TopicCatalog::standard();
        let classifier = TopicClassifier::from_catalog(&catalog);
        Self::new(catalog, classifier, max_slot_retries)
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn max_slot_retries(&self) -> u32 {
        self.max_slot_retries
    }

    /// Runs one message through the dialogue state machine.
    pub fn advance(&self, session: &mut IntakeSession, text: &str) -> Advance {
        match self.active_definition(session) {
            Some(definition) => self.continue_topic(session, definition, text),
            None => self.start_topic(session, text),
        }
    }

    /// Builds the reply for a step. `message` is the text that is sent,
    /// which for unclassified input comes from outside the engine.
    pub fn respond(
        &self,
        session_id: &SessionId,
        input: &str,
        advance: &Advance,
        message: String,
    ) -> Response {
        let scan = self.detector.scan(&[input, &message]);
        let emergency = scan.is_emergency();
        let reply = Reply {
            session_id: session_id.clone(),
            message,
            emergency_flag: emergency,
            topic_closed: advance.closes_topic(),
            action: emergency.then_some(ReplyAction::Emergency),
            topic: advance.topic(),
            tier: advance.tier(),
        };
        Response { reply, scan }
    }

    /// Message used when neither a topic nor a knowledge article matched.
    pub fn fallback_message(&self) -> &'static str {
        FALLBACK_MESSAGE
    }

    fn active_definition(&self, session: &mut IntakeSession) -> Option<&TopicDefinition> {
        let topic = session.current_topic()?;
        let definition = self.catalog.definition(topic);
        if definition.is_none() {
            warn!(
                session_id = %session.session_id(),
                topic = %topic,
                "Session refers to a topic without definition, closing it"
            );
            session.close_topic();
        }
        definition
    }

    fn start_topic(&self, session: &mut IntakeSession, text: &str) -> Advance {
        let topic = match self.classifier.classify(text) {
            Classification::Topic(topic) => topic,
            Classification::Unclassified => {
                debug!(session_id = %session.session_id(), "Input matched no topic");
                return Advance::Unclassified {
                    inquiry: KnowledgeQuery::detect(text),
                };
            }
        };

        let Some(definition) = self.catalog.definition(topic) else {
            return Advance::Unclassified {
                inquiry: KnowledgeQuery::detect(text),
            };
        };

        session.enter_topic(topic);
        info!(session_id = %session.session_id(), topic = %topic, "Topic entered");
        self.apply_selection(session, definition, false)
    }

    fn continue_topic(
        &self,
        session: &mut IntakeSession,
        definition: &TopicDefinition,
        text: &str,
    ) -> Advance {
        let topic = definition.topic;
        let Some(spec) = definition.open_slot(session.slots()) else {
            return self.apply_selection(session, definition, false);
        };

        match self.extractor.extract(topic, spec, text) {
            Extraction::Value(value) => {
                debug!(
                    session_id = %session.session_id(),
                    topic = %topic,
                    slot = %spec.name,
                    "Slot filled"
                );
                session.fill_slot(spec.name, value);
                self.apply_selection(session, definition, false)
            }
            Extraction::Unrecognized => {
                let attempts = session.record_failed_attempt();
                if self.max_slot_retries > 0 && attempts >= self.max_slot_retries {
                    warn!(
                        session_id = %session.session_id(),
                        topic = %topic,
                        slot = %spec.name,
                        attempts,
                        "Retry cap reached, abandoning topic"
                    );
                    session.close_topic();
                    return Advance::Abandoned { topic };
                }
                self.apply_selection(session, definition, true)
            }
        }
    }

    fn apply_selection(
        &self,
        session: &mut IntakeSession,
        definition: &TopicDefinition,
        reprompt: bool,
    ) -> Advance {
        let topic = definition.topic;
        let selection = self.selector.select(definition, session.slots());

        if let Err(err) = session.move_to(selection.stage()) {
            warn!(
                session_id = %session.session_id(),
                topic = %topic,
                error = %err,
                "Unexpected dialogue stage, restarting topic"
            );
            session.close_topic();
            session.enter_topic(topic);
            let _ = session.move_to(selection.stage());
        }

        match selection {
            Selection::Ask { slot, question } => Advance::Ask {
                topic,
                slot,
                question,
                reprompt,
            },
            Selection::Resolve(advisory) => {
                info!(
                    session_id = %session.session_id(),
                    topic = %topic,
                    tier = %advisory.tier,
                    step = session.step(),
                    "Topic resolved"
                );
                session.close_topic();
                Advance::Resolved { topic, advisory }
            }
        }
    }
}

/// Stage a session is expected to be in after `advance` returns.
pub fn expected_stage(advance: &Advance) -> DialogueStage {
    match advance {
        Advance::Ask { slot, .. } => DialogueStage::AwaitingSlot(*slot),
        _ => DialogueStage::Idle,
    }
}
