//! Pre-authored response templates.
//!
//! Every reply the assistant can give lives in this table, keyed by
//! [`ResponseKey`]. Bodies are Markdown and may reference `{name}` (the
//! user's display name) and `{minutes}` (the extracted duration).

use serde::Serialize;
use strum::{Display, EnumIter};

use crate::transcript::MessageCategory;

/// Identifies one entry of the template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ResponseKey {
    Welcome,
    QuickPattern,
    StandardPattern,
    AdvancedPattern,
    FullImmersion,
    History,
    PatternLearning,
    Encouragement,
    TechniqueTips,
    General,
}

/// A fixed reply: body template, category and ordered follow-up suggestions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseTemplate {
    pub body: &'static str,
    pub category: MessageCategory,
    pub suggestions: &'static [&'static str],
}

/// Looks up the template for `key`.
pub fn template(key: ResponseKey) -> &'static ResponseTemplate {
    match key {
        ResponseKey::Welcome => &WELCOME,
        ResponseKey::QuickPattern => &QUICK_PATTERN,
        ResponseKey::StandardPattern => &STANDARD_PATTERN,
        ResponseKey::AdvancedPattern => &ADVANCED_PATTERN,
        ResponseKey::FullImmersion => &FULL_IMMERSION,
        ResponseKey::History => &HISTORY,
        ResponseKey::PatternLearning => &PATTERN_LEARNING,
        ResponseKey::Encouragement => &ENCOURAGEMENT,
        ResponseKey::TechniqueTips => &TECHNIQUE_TIPS,
        ResponseKey::General => &GENERAL,
    }
}

static WELCOME: ResponseTemplate = ResponseTemplate {
    body: "\
Vanakkam, {name}! 🙏 I'm your kolam companion.

I can help you:
• **Pick a pattern** that fits the time you have
• **Learn the story** behind kolam and the festivals it belongs to
• **Fix your lines** with practical drawing techniques

Tell me how much time you have today, or ask me anything about kolam.",
    category: MessageCategory::General,
    suggestions: &[
        "I have 15 minutes",
        "Tell me the history of kolam",
        "Teach me a beginner pattern",
        "Give me some technique tips",
    ],
};

static QUICK_PATTERN: ResponseTemplate = ResponseTemplate {
    body: "\
## ⏱️ A {minutes}-minute kolam, {name}

Short on time? A **3×3 pulli (dot) grid** is perfect.

**Steps**
• Place 9 dots in a square, about two finger-widths apart
• Loop a single line around each dot without lifting your hand
• Close the loop back where you started

**Why this works:** one continuous line trains your wrist and is finished before the powder dries on your fingers.

Take a photo when you finish. Small daily kolams build the steadiest hands.",
    category: MessageCategory::Tutorial,
    suggestions: &[
        "Show me a 5×5 grid next",
        "How do I keep my lines even?",
        "What does the single-line loop mean?",
    ],
};

static STANDARD_PATTERN: ResponseTemplate = ResponseTemplate {
    body: "\
## 🌼 A {minutes}-minute session: the lotus kolam

{name}, this is enough time for a classic **lotus (thamarai) kolam** on a 5×5 grid.

**Plan**
1. **Warm up (5 min)**: draw three single-dot loops on scrap paper
2. **Grid (5 min)**: lay 25 dots; check rows are straight before you continue
3. **Petals (25 min)**: curve outward from the centre dot, one petal per side
4. **Border (remaining time)**: join the outer dots with a wave line

**Watch for**
• Keep the powder pinch between thumb and forefinger
• Rotate your body, not the pattern

Want me to break the petals down step by step?",
    category: MessageCategory::Tutorial,
    suggestions: &[
        "Break down the petals",
        "What does the lotus symbolize?",
        "Give me tips for curves",
        "I have more time",
    ],
};

static ADVANCED_PATTERN: ResponseTemplate = ResponseTemplate {
    body: "\
## 🪔 {minutes} minutes: an advanced sikku kolam

With this much time, {name}, you can try a **sikku (knotted) kolam**: a single line that weaves around every dot of a 7×7 grid and never crosses itself twice at the same point.

**Session plan**
1. **Grid (10 min)**: 49 dots, measured with your palm width
2. **Skeleton (20 min)**: trace the path lightly with chalk first
3. **Weave (40 min)**: follow the skeleton with rice flour in one motion per quadrant
4. **Finish (remaining time)**: add colour to the enclosed spaces

**Challenge**
• Sikku kolams follow strict symmetry; check each quadrant against the opposite one
• If you lose the path, pause and count loops around the nearest dot

This is the pattern family mathematicians study for its closed-curve properties.",
    category: MessageCategory::Tutorial,
    suggestions: &[
        "How do I plan the skeleton?",
        "Explain the symmetry rules",
        "Which colours are traditional?",
        "Tell me about kolam and mathematics",
    ],
};

static FULL_IMMERSION: ResponseTemplate = ResponseTemplate {
    body: "\
## 🎉 Full immersion: {minutes} minutes of kolam

{name}, a whole session like this is how families prepare for **Pongal** or **Margazhi** mornings.

**Morning: foundations**
• Practise dot grids from 3×3 up to 9×9
• Draw four single-line kolams to loosen your wrist

**Midday: a festival kolam**
• Choose a large pattern with a central lotus and four lamps (vilakku)
• Work outward ring by ring; rest between rings

**Afternoon: colour and story**
• Fill the design with coloured powders
• Learn the meaning of each motif as you colour it

**Evening: reflect**
• Photograph the kolam at sunset
• Note which parts felt easy and which need practice tomorrow

Traditionally the kolam is drawn at dawn and lets the day's first footsteps blur it. Enjoy the process, not just the result.",
    category: MessageCategory::Tutorial,
    suggestions: &[
        "Start with the 3×3 warm-up",
        "Tell me about Margazhi kolams",
        "Which motifs mean prosperity?",
        "How do I prepare coloured powder?",
        "Plan a shorter session instead",
    ],
};

static HISTORY: ResponseTemplate = ResponseTemplate {
    body: "\
## 📜 The story of kolam

Kolam is a centuries-old art from **Tamil Nadu** and neighbouring regions, drawn every dawn at the threshold of the home.

**Meaning**
• It welcomes prosperity and the goddess Lakshmi into the house
• The rice flour feeds ants and birds, a daily act of generosity
• An unbroken line is believed to keep misfortune from entering

**Seasons**
• During the month of **Margazhi** (December–January), kolams grow larger each morning
• **Pongal** brings the most elaborate designs, often with pots of overflowing rice

**Passing it on**
Kolam has traditionally been taught from grandmother to granddaughter, by watching and copying rather than from written instructions.

{name}, every line you draw continues that chain.",
    category: MessageCategory::Cultural,
    suggestions: &[
        "Why is it drawn at dawn?",
        "Tell me about Pongal kolams",
        "Teach me a traditional pattern",
        "How is kolam linked to mathematics?",
    ],
};

static PATTERN_LEARNING: ResponseTemplate = ResponseTemplate {
    body: "\
## ✏️ Let's learn a pattern, {name}

Every kolam starts with **pulli (dots)** and **kodu (lines)**.

**Your first kolam**
1. Place a 3×3 grid of dots
2. Draw a loop around the centre dot
3. Connect the corner dots with curves that bend around the edges
4. Join everything into one closed line

**Pattern families to explore next**
• **Pulli kolam**: lines loop around dots
• **Sikku kolam**: one line weaves through the whole grid
• **Kambi kolam**: straight-line geometric designs

Tell me how much time you have and I'll suggest a pattern that fits.",
    category: MessageCategory::Tutorial,
    suggestions: &[
        "I have 30 minutes",
        "What is a sikku kolam?",
        "Give me tips for straight lines",
    ],
};

static ENCOURAGEMENT: ResponseTemplate = ResponseTemplate {
    body: "\
## 💛 Every kolam artist has been here, {name}

Wobbly lines and broken loops are part of learning. Even experienced artists sweep away their first attempt each morning and start again.

**Try this**
• **Slow down**: steady beats fast while your hand learns the motion
• **Go smaller**: drop back to a 3×3 grid until the loops feel natural
• **Use chalk first**: sketch lightly, then trace with flour
• **Look at the dots, not your hand**: your eyes lead the line

Remember: a kolam is meant to fade by evening. Tomorrow is a fresh threshold.",
    category: MessageCategory::Tips,
    suggestions: &[
        "Give me an easy pattern",
        "How do I hold the powder?",
        "I have 15 minutes to practise",
    ],
};

static TECHNIQUE_TIPS: ResponseTemplate = ResponseTemplate {
    body: "\
## 🎯 Technique tips

**Holding the powder**
• Pinch the flour between thumb and forefinger
• Let it flow by rubbing your fingers gently; don't squeeze

**Straight and smooth lines**
• Keep your hand at a constant height above the ground
• Move from the shoulder for long curves, from the wrist for small loops

**Symmetry**
• Work from the centre outwards
• After each ring, compare opposite sides before continuing

**Practice routine**
• Five minutes of single loops every day beats one long weekly session

Happy drawing, {name}!",
    category: MessageCategory::Tips,
    suggestions: &[
        "Teach me a pattern to practise",
        "How do I fix uneven spacing?",
        "What powder should I use?",
        "I have 1 hour",
    ],
};

static GENERAL: ResponseTemplate = ResponseTemplate {
    body: "\
I'm here to help with kolam, {name}!

You can ask me to:
• **Suggest a pattern**: tell me how much time you have (\"I have 20 minutes\")
• **Share the history**: where kolam comes from and what it means
• **Teach a design**: step-by-step guidance for beginners
• **Improve your technique**: tips for lines, curves and symmetry

What would you like to explore?",
    category: MessageCategory::General,
    suggestions: &[
        "I have 20 minutes",
        "Tell me the history of kolam",
        "Teach me a pattern",
        "Give me technique tips",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_key_has_a_template() {
        for key in ResponseKey::iter() {
            let tpl = template(key);
            assert!(!tpl.body.trim().is_empty(), "{key} has an empty body");
            assert!(
                (3..=5).contains(&tpl.suggestions.len()),
                "{key} has {} suggestions",
                tpl.suggestions.len()
            );
        }
    }

    #[test]
    fn test_tier_templates_are_tutorials() {
        for key in [
            ResponseKey::QuickPattern,
            ResponseKey::StandardPattern,
            ResponseKey::AdvancedPattern,
            ResponseKey::FullImmersion,
        ] {
            assert_eq!(template(key).category, MessageCategory::Tutorial);
            assert!(template(key).body.contains("{minutes}"));
        }
    }

    #[test]
    fn test_history_is_cultural() {
        assert_eq!(
            template(ResponseKey::History).category,
            MessageCategory::Cultural
        );
    }
}
