// Text cleanup for extracted fields

const MONEY_MARKERS: [char; 5] = ['$', '💰', '💵', '💲', '💸'];

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF      // pictographs, emoticons, regional indicators, skin tones
            | 0x2300..=0x23FF  // misc technical (⌚ ⏰ ...)
            | 0x2600..=0x27BF  // misc symbols and dingbats
            | 0x2B00..=0x2BFF  // arrows, ⭐
            | 0x200D           // zero width joiner
            | 0x20E3           // keycap
            | 0xFE0F           // emoji presentation selector
            | 0xE0020..=0xE007F // tag sequences
    )
}

pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|&c| !is_emoji(c)).collect()
}

/// Strips emoji, then surrounding whitespace. Inner runs of whitespace collapse to one space.
pub fn clean_text(text: &str) -> String {
    strip_emoji(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Must run on the raw text: the marker itself may be an emoji.
pub fn has_money_marker(text: &str) -> bool {
    text.contains(MONEY_MARKERS)
}
