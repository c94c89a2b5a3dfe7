//! Built-in knowledge base with short articles per condition.
//!
//! Every condition has an overview; the other inquiry kinds fall back to the
//! overview when no dedicated article exists.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::intake::{Condition, InquiryKind, KnowledgeArticle, KnowledgeQuery};
use crate::ports::{KnowledgeError, KnowledgeSource};

type Entry = (&'static str, &'static str);

static ARTICLES: Lazy<HashMap<(Condition, InquiryKind), Entry>> = Lazy::new(|| {
    use Condition::*;
    use InquiryKind::*;

    let mut m = HashMap::new();

    // Diabetes
    m.insert(
        (Diabetes, Overview),
        (
            "DIABETES",
            "A long-term condition in which blood sugar stays too high, either because the body \
makes too little insulin (type 1) or does not respond to it well (type 2).",
        ),
    );
    m.insert(
        (Diabetes, Symptoms),
        (
            "DIABETES - SIGNS",
            "- Increased thirst and frequent urination\n- Unexplained weight loss\n\
- Tiredness and blurred vision\n- Slow-healing sores",
        ),
    );
    m.insert(
        (Diabetes, Treatment),
        (
            "DIABETES - TREATMENT",
            "- Blood sugar monitoring\n- Insulin or oral medication as prescribed\n\
- Balanced diet and regular activity\n- Regular check-ups for eyes, feet and kidneys",
        ),
    );
    m.insert(
        (Diabetes, Prevention),
        (
            "DIABETES - PREVENTION",
            "- Keep a healthy weight\n- Stay active most days of the week\n\
- Limit sugary drinks and refined carbohydrates\n- Get screened if you have risk factors",
        ),
    );

    // Stroke
    m.insert(
        (Stroke, Overview),
        (
            "STROKE",
            "A stroke happens when blood supply to part of the brain is blocked or a vessel bursts. \
It is a medical emergency: call emergency services at once if you suspect one.",
        ),
    );
    m.insert(
        (Stroke, Symptoms),
        (
            "STROKE - WARNING SIGNS (F.A.S.T.)",
            "- Face drooping on one side\n- Arm weakness or numbness\n- Speech slurred or strange\n\
- Time to call emergency services immediately",
        ),
    );
    m.insert(
        (Stroke, Treatment),
        (
            "STROKE - TREATMENT",
            "Treatment depends on the type of stroke and starts in hospital, ideally within hours. \
Recovery usually involves rehabilitation with physiotherapy and speech therapy.",
        ),
    );
    m.insert(
        (Stroke, Prevention),
        (
            "STROKE - PREVENTION",
            "- Keep blood pressure under control\n- Do not smoke\n- Stay active and eat well\n\
- Manage cholesterol and diabetes",
        ),
    );

    // Cancer
    m.insert(
        (Cancer, Overview),
        (
            "CANCER",
            "A group of diseases in which abnormal cells grow without control and can spread to \
other parts of the body. Outcomes are much better when it is found early.",
        ),
    );
    m.insert(
        (Cancer, Symptoms),
        (
            "CANCER - SIGNS TO CHECK",
            "- A new lump or swelling\n- Unexplained weight loss\n- A persistent change in bowel \
or bladder habits\n- A sore that does not heal\n\nSee a doctor if any of these last more than a few weeks.",
        ),
    );
    m.insert(
        (Cancer, Treatment),
        (
            "CANCER - TREATMENT",
            "Options include surgery, chemotherapy, radiotherapy, immunotherapy and targeted \
therapy, usually planned by a specialist team.",
        ),
    );
    m.insert(
        (Cancer, Prevention),
        (
            "CANCER - PREVENTION",
            "- Do not smoke\n- Limit alcohol\n- Protect your skin from the sun\n\
- Take part in screening programmes",
        ),
    );

    // Hypertension
    m.insert(
        (Hypertension, Overview),
        (
            "HIGH BLOOD PRESSURE",
            "Blood pressure that stays at or above 130/80 mmHg. It rarely causes symptoms but \
raises the risk of heart and kidney disease.",
        ),
    );
    m.insert(
        (Hypertension, Treatment),
        (
            "HIGH BLOOD PRESSURE - TREATMENT",
            "- Less salt, more fruit and vegetables\n- Regular activity\n\
- Medication prescribed by your doctor\n- Home blood pressure checks",
        ),
    );
    m.insert(
        (Hypertension, Prevention),
        (
            "HIGH BLOOD PRESSURE - PREVENTION",
            "- Keep a healthy weight\n- Limit salt and alcohol\n- Stay active\n\
- Have your blood pressure checked yearly",
        ),
    );

    // Arthritis
    m.insert(
        (Arthritis, Overview),
        (
            "ARTHRITIS",
            "Inflammation of one or more joints, causing stiffness and discomfort that usually \
gets worse with age. Osteoarthritis and rheumatoid arthritis are the most common forms.",
        ),
    );
    m.insert(
        (Arthritis, Treatment),
        (
            "ARTHRITIS - TREATMENT",
            "- Gentle regular exercise\n- Physiotherapy\n- Anti-inflammatory medication as \
directed\n- Joint replacement in severe cases",
        ),
    );

    // Depression
    m.insert(
        (Depression, Overview),
        (
            "DEPRESSION",
            "A common mental health condition with a persistently low mood or loss of interest \
lasting two weeks or more. It is treatable, and talking to a doctor is a good first step.",
        ),
    );
    m.insert(
        (Depression, Symptoms),
        (
            "DEPRESSION - SIGNS",
            "- Low mood most of the day\n- Loss of interest in things you used to enjoy\n\
- Changes in sleep or appetite\n- Feeling worthless or hopeless\n\n\
If you have thoughts of harming yourself, please contact a crisis line or our staff right away.",
        ),
    );
    m.insert(
        (Depression, Treatment),
        (
            "DEPRESSION - TREATMENT",
            "- Talking therapies such as CBT\n- Antidepressant medication when appropriate\n\
- Regular activity, routine and social contact",
        ),
    );

    m
});

/// Knowledge source backed by the built-in article table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    fn article(&self, condition: Condition, kind: InquiryKind) -> Option<KnowledgeArticle> {
        let (resolved_kind, (title, body)) = ARTICLES
            .get(&(condition, kind))
            .map(|entry| (kind, entry))
            .or_else(|| {
                ARTICLES
                    .get(&(condition, InquiryKind::Overview))
                    .map(|entry| (InquiryKind::Overview, entry))
            })?;

        Some(KnowledgeArticle {
            condition,
            kind: resolved_kind,
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}

#[async_trait]
impl KnowledgeSource for StaticKnowledgeBase {
    async fn lookup(&self, query: &KnowledgeQuery) -> Result<Option<KnowledgeArticle>, KnowledgeError> {
        Ok(self.article(query.condition, query.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::EmergencyDetector;

    #[test]
    fn every_condition_has_an_overview() {
        for condition in Condition::ALL {
            assert!(
                ARTICLES.contains_key(&(condition, InquiryKind::Overview)),
                "{}",
                condition
            );
        }
    }

    #[tokio::test]
    async fn returns_requested_kind() {
        let kb = StaticKnowledgeBase::new();
        let query = KnowledgeQuery {
            condition: Condition::Diabetes,
            kind: InquiryKind::Prevention,
        };
        let article = kb.lookup(&query).await.unwrap().unwrap();
        assert_eq!(article.kind, InquiryKind::Prevention);
        assert!(article.title.contains("PREVENTION"));
    }

    #[tokio::test]
    async fn missing_kind_falls_back_to_overview() {
        let kb = StaticKnowledgeBase::new();
        let query = KnowledgeQuery {
            condition: Condition::Arthritis,
            kind: InquiryKind::Prevention,
        };
        let article = kb.lookup(&query).await.unwrap().unwrap();
        assert_eq!(article.kind, InquiryKind::Overview);
        assert_eq!(article.title, "ARTHRITIS");
    }

    #[test]
    fn only_stroke_articles_raise_the_emergency_flag() {
        let detector = EmergencyDetector::new();
        for ((condition, kind), (title, body)) in ARTICLES.iter() {
            let flagged = detector.scan(&[*title, *body]).is_emergency();
            let expected = *condition == Condition::Stroke
                && matches!(kind, InquiryKind::Overview | InquiryKind::Symptoms);
            assert_eq!(flagged, expected, "{} {}", condition, kind);
        }
    }
}
