use super::parser::SENTINEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Single,
    Compare,
}

impl ScanMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "scan" => Some(ScanMode::Single),
            "compare" => Some(ScanMode::Compare),
            _ => None,
        }
    }

    /// Mode implied by the upload when the client does not name one.
    pub fn infer(image_count: usize) -> Self {
        if image_count > 1 {
            ScanMode::Compare
        } else {
            ScanMode::Single
        }
    }
}

const OUTPUT_FORMAT: &str = "\
OUTPUT FORMAT (keep this order):
1. Food Summary: one line saying what the food is, in simple words.
2. What's Concerning: at most 3 short bullet points in plain language.
3. Real-Life Impact: at most 2 short sentences about bloating, acne or energy crashes.
4. Risk Level: exactly one of 🟢 Safe for regular eating, 🟡 Okay occasionally, 🟠 Limit it, 🔴 Avoid frequent eating.
5. Damage-Control Tip: one practical line, like a short walk or adding fiber.
6. Just saying... 😉: a light, sarcastic one-liner of at most 20 words.";

const STYLE_RULES: &str = "\
RULES:
- Use a hyphen (-) for bullet points. Never use asterisks (*).
- Humour stays light and sweet. Joke about the food only, never about the user's body, weight or character.
- Simple English with at most 1-2 Hindi words (like 'yaar').
- 1-3 emojis in total.
- No medical advice and no maths in sections 1-6. Keep it short.";

/// Builds the single instruction sent alongside the photos.
pub fn build_instruction(goal: &str, mode: ScanMode, embed_meal_data: bool) -> String {
    let task = match mode {
        ScanMode::Single => "Analyze the food in this photo.",
        ScanMode::Compare => {
            "COMPARE the foods in these two photos and pick the 'Lesser Evil', saying why."
        }
    };

    let mut prompt = format!(
        "Act as a nutrition coach. User focus: {goal}.\n{task}\n\n{OUTPUT_FORMAT}\n\n{STYLE_RULES}"
    );

    if embed_meal_data {
        let subject = match mode {
            ScanMode::Single => "the food",
            ScanMode::Compare => "the food you picked as the lesser evil",
        };
        prompt.push_str(&format!(
            "\n\nAfter section 6, add a final block for the app, exactly like this:\n\
             {SENTINEL}\n\
             {{\"foodName\": \"<name of {subject}>\", \"calories\": <estimated kcal as a number>}}\n\
             {SENTINEL}\n\
             The block must contain only that JSON object."
        ));
    }

    prompt
}
