//! Questions, resolvers and advisory templates for each topic.
//!
//! One deterministic template per tier. Only emergency-tier templates may
//! contain words from the emergency keyword set; the emergency flag of a
//! reply is derived from the text, so a self-care template that mentioned
//! e.g. "chest pain" would raise a false alarm.

use super::extractor::first_number;
use super::slot::{SlotName, Slots};
use super::tier::Tier;

/// Lower bound (inclusive) of the emergency fever tier, in °C.
pub const HIGH_FEVER_CELSIUS: f64 = 39.5;

/// Lower bound (inclusive) of the moderate fever band, in °C.
pub const MODERATE_FEVER_CELSIUS: f64 = 38.0;

/// A moderate fever lasting more than this many days is escalated.
pub const PROLONGED_FEVER_DAYS: f64 = 3.0;

/// Final message of a resolved topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub tier: Tier,
    pub message: String,
}

impl Advisory {
    pub fn new(tier: Tier, message: impl Into<String>) -> Self {
        Self {
            tier,
            message: message.into(),
        }
    }
}

/// Reply for input that matched no topic and no knowledge article.
pub const FALLBACK_MESSAGE: &str = "MEDICAL ASSISTANT\n\n\
I'm here to help with your health concerns. Please describe:\n\
- Specific symptoms (fever, headache, cough, pain, etc.)\n\
- How you're feeling\n\
- How long it has been going on\n\n\
I'll guide you step by step based on your answers.";

/// Reply when the retry cap for an unreadable answer is reached.
pub const RETRY_EXHAUSTED_MESSAGE: &str = "I couldn't make sense of those answers, so let's start over.\n\n\
Please describe your main symptom again, or speak with a member of our medical staff \
if you are unsure how to answer.";

// ════════════════════════════════════════════════════════════════════════════════
// Questions
// ════════════════════════════════════════════════════════════════════════════════

pub fn temperature_question(_: &Slots) -> String {
    "FEVER ASSESSMENT\n\n\
I understand you have a fever. What is your temperature?\n\
- Please give the number (e.g. 38.5°C or 101°F)\n\
- This helps determine how serious it is"
        .to_string()
}

pub fn duration_question(slots: &Slots) -> String {
    let temp = slots.number(SlotName::Temperature).unwrap_or_default();
    format!(
        "MODERATE FEVER - {:.1}°C\n\n\
- A moderate fever needs attention\n\
- Rest and fluids are essential\n\n\
How long have you had this fever? Hours? Days?",
        temp
    )
}

pub fn severity_question(_: &Slots) -> String {
    "HEADACHE ASSESSMENT\n\n\
I understand you have a headache. How would you describe it?\n\
- Mild, moderate or severe?\n\
- Did it come on suddenly or build up gradually?"
        .to_string()
}

pub fn cough_type_question(_: &Slots) -> String {
    "COUGH ASSESSMENT\n\n\
I understand you have a cough. What kind of cough is it?\n\
- Dry (no mucus)\n\
- Wet or productive (with mucus)\n\
- Barking\n\
- Any blood, or trouble catching your breath?"
        .to_string()
}

pub fn stomach_symptoms_question(_: &Slots) -> String {
    "STOMACH ISSUES\n\n\
I understand you have stomach problems. What exactly are you noticing?\n\
- Pain, nausea, vomiting, diarrhea?\n\
- Where is the discomfort?"
        .to_string()
}

pub fn pain_description_question(_: &Slots) -> String {
    "SYMPTOM ASSESSMENT\n\n\
I understand you're in pain. Please tell me:\n\
- Where it hurts\n\
- How strong it is (mild, moderate, severe)\n\
- How long it has lasted"
        .to_string()
}

// ════════════════════════════════════════════════════════════════════════════════
// Slot conditions
// ════════════════════════════════════════════════════════════════════════════════

/// Duration is only asked for a moderate fever.
pub fn is_moderate_fever(slots: &Slots) -> bool {
    slots
        .number(SlotName::Temperature)
        .map(|t| (MODERATE_FEVER_CELSIUS..HIGH_FEVER_CELSIUS).contains(&t))
        .unwrap_or(false)
}

// ════════════════════════════════════════════════════════════════════════════════
// Resolvers
// ════════════════════════════════════════════════════════════════════════════════

pub fn resolve_fever(slots: &Slots) -> Advisory {
    let Some(temp) = slots.number(SlotName::Temperature) else {
        return Advisory::new(Tier::SelfCare, low_grade_fever(None));
    };

    if temp >= HIGH_FEVER_CELSIUS {
        return Advisory::new(
            Tier::Emergency,
            format!(
                "HIGH FEVER EMERGENCY - {:.1}°C\n\n\
Immediate actions:\n\
- Go to the emergency department now\n\
- This could indicate a serious infection\n\
- Take paracetamol/acetaminophen if available\n\
- Drink plenty of water\n\
- Watch for confusion or a stiff neck",
                temp
            ),
        );
    }

    if temp >= MODERATE_FEVER_CELSIUS {
        let duration = slots
            .get(SlotName::Duration)
            .and_then(|v| v.as_text())
            .unwrap_or_default()
            .to_string();

        if is_prolonged(&duration.to_lowercase()) {
            return Advisory::new(
                Tier::Escalate,
                format!(
                    "PROLONGED FEVER - {:.1}°C for {}\n\n\
Medical attention needed:\n\
- A fever lasting several days needs a doctor's visit\n\
- It could point to a bacterial infection\n\
- Please see a healthcare provider today",
                    temp, duration
                ),
            );
        }

        return Advisory::new(
            Tier::SelfCare,
            format!(
                "FEVER MANAGEMENT - {:.1}°C for {}\n\n\
Recommended care:\n\
- Rest and stay well hydrated\n\
- Take fever reducers as directed\n\
- Check your temperature every 4 hours\n\
- See a doctor if it is not improving within 24 hours",
                temp, duration
            ),
        );
    }

    Advisory::new(Tier::SelfCare, low_grade_fever(Some(temp)))
}

fn low_grade_fever(temp: Option<f64>) -> String {
    let heading = match temp {
        Some(t) => format!("LOW-GRADE FEVER - {:.1}°C", t),
        None => "LOW-GRADE FEVER".to_string(),
    };
    format!(
        "{}\n\n\
Guidance:\n\
- Usually not serious\n\
- Rest and fluids should help\n\
- Keep an eye out for other symptoms\n\
- It should improve within 1-2 days",
        heading
    )
}

/// Mentions "day" and the first number in it is more than three.
fn is_prolonged(duration: &str) -> bool {
    duration.contains("day")
        && first_number(duration)
            .map(|days| days > PROLONGED_FEVER_DAYS)
            .unwrap_or(false)
}

pub fn resolve_headache(slots: &Slots) -> Advisory {
    let severity = slots.text_lower(SlotName::Severity).unwrap_or_default();
    if ["severe", "worst", "sudden"].iter().any(|w| severity.contains(w)) {
        return Advisory::new(
            Tier::Emergency,
            "SEVERE HEADACHE - POTENTIAL EMERGENCY\n\n\
Seek emergency care immediately if:\n\
- It came on suddenly and severely\n\
- You also have a fever and a stiff neck\n\
- You feel confused or your vision changes\n\
- It followed a head injury\n\n\
Otherwise:\n\
- Rest in a dark, quiet room\n\
- Stay hydrated\n\
- Use over-the-counter pain relief",
        );
    }

    Advisory::new(
        Tier::SelfCare,
        "HEADACHE MANAGEMENT\n\n\
Self-care:\n\
- Rest somewhere quiet\n\
- Stay hydrated\n\
- Consider a pain reliever\n\
- Put a cold compress on your forehead\n\n\
See a doctor if:\n\
- It lasts more than 2 days\n\
- It gets significantly worse\n\
- Other symptoms appear",
    )
}

pub fn resolve_cough(slots: &Slots) -> Advisory {
    let cough = slots.text_lower(SlotName::CoughType).unwrap_or_default();
    if cough.contains("blood") {
        return Advisory::new(
            Tier::Emergency,
            "COUGHING BLOOD - EMERGENCY\n\n\
Go to the hospital immediately:\n\
- This is a serious symptom\n\
- It can indicate a lung problem\n\
- Don't wait, seek care now",
        );
    }
    if cough.contains("breath") {
        return Advisory::new(
            Tier::Escalate,
            "BREATHING DIFFICULTY\n\n\
Urgent care needed:\n\
- Sit upright and stay calm\n\
- Use your rescue inhaler if you have one\n\
- Get to urgent care today\n\
- Go straight to the hospital if your lips turn blue or you can't speak normally",
        );
    }

    Advisory::new(
        Tier::SelfCare,
        "COUGH CARE\n\n\
Management:\n\
- Stay well hydrated\n\
- Honey or lozenges can soothe your throat\n\
- Use a humidifier at night\n\
- Avoid smoke and other irritants\n\n\
See a doctor if:\n\
- It lasts more than 3 weeks\n\
- A fever develops\n\
- Breathing becomes difficult",
    )
}

pub fn resolve_cold(_: &Slots) -> Advisory {
    Advisory::new(
        Tier::SelfCare,
        "COLD / FLU SYMPTOMS\n\n\
Typical care:\n\
- Rest and fluids are essential\n\
- Over-the-counter symptom relief\n\
- Usually improves within 7-10 days\n\n\
See a doctor if:\n\
- Your fever rises above 39°C\n\
- Breathing becomes difficult\n\
- Symptoms worsen after a week",
    )
}

pub fn resolve_stomach(slots: &Slots) -> Advisory {
    let symptoms = slots.text_lower(SlotName::Symptoms).unwrap_or_default();
    if symptoms.contains("blood") || symptoms.contains("severe pain") {
        return Advisory::new(
            Tier::Emergency,
            "ABDOMINAL EMERGENCY\n\n\
Seek immediate care for:\n\
- Severe abdominal pain\n\
- Blood in vomit or black stools\n\
- High fever together with pain",
        );
    }

    Advisory::new(
        Tier::SelfCare,
        "STOMACH CARE\n\n\
General guidance:\n\
- Clear fluids at first\n\
- Bland foods (bananas, rice, applesauce, toast)\n\
- Rest\n\
- Avoid dairy and fatty foods\n\n\
See a doctor if:\n\
- Symptoms last more than 2 days\n\
- You notice signs of dehydration\n\
- The pain becomes strong",
    )
}

pub fn resolve_chest_pain(_: &Slots) -> Advisory {
    Advisory::new(
        Tier::Emergency,
        "CHEST / HEART SYMPTOMS - THIS COULD BE SERIOUS\n\n\
Call emergency services immediately if you have:\n\
- Chest pain or pressure\n\
- Pain spreading to the arm or jaw\n\
- Shortness of breath\n\
- Nausea with sweating\n\
- Dizziness or fainting\n\n\
Don't wait.",
    )
}

pub fn resolve_breathing(_: &Slots) -> Advisory {
    Advisory::new(
        Tier::Escalate,
        "BREATHING DIFFICULTIES\n\n\
Urgent assessment needed today.\n\n\
Go straight to the hospital if:\n\
- You can't catch your breath\n\
- Your lips or fingernails turn blue\n\
- You are wheezing heavily\n\
- You can't finish a sentence\n\n\
Meanwhile:\n\
- Sit upright and stay calm\n\
- Use your rescue inhaler if you have one",
    )
}

pub fn resolve_pain(slots: &Slots) -> Advisory {
    let description = slots.text_lower(SlotName::Description).unwrap_or_default();
    if ["severe", "worst", "unbearable"]
        .iter()
        .any(|w| description.contains(w))
    {
        return Advisory::new(
            Tier::Escalate,
            "STRONG PAIN\n\n\
Please have this checked by a doctor today:\n\
- Strong pain deserves a proper examination\n\
- Note when it started and what makes it worse\n\
- Avoid taking more pain relief than directed",
        );
    }

    Advisory::new(
        Tier::SelfCare,
        "PAIN MANAGEMENT\n\n\
Self-care:\n\
- Rest the affected area\n\
- Apply cold for fresh injuries, warmth for stiffness\n\
- Over-the-counter pain relief as directed\n\n\
See a doctor if:\n\
- It lasts more than a few days\n\
- It keeps getting worse\n\
- Swelling, numbness or fever appear",
    )
}
