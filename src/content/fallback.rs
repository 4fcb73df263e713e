//! Bundled dashboard shown when neither the cache nor the backend can supply one

use std::sync::{Arc, OnceLock};

use chrono::{SecondsFormat, Utc};

use super::{
    Attribute, Content, Devotional, GospelConnection, HistoricalEvent, Passage, PrayerFocus,
    ReflectionQuestions, Theme, Timeline, VerseOfDay,
};

const REFLECTION: &str = "Our journey with Christ is often less about the destination and more about the daily rhythm of trust. To walk by faith is to take the next step even when the horizon is clouded. It is a quiet confidence that He who called you is faithful to lead you. Today, do not worry about the miles ahead; simply focus on the step directly in front of you, trusting that His grace is sufficient for this moment.";

/// Process-wide static snapshot of the bundled dashboard
///
/// The snapshot is built lazily on first use and stamped with that moment's
/// timestamp, then shared by every clone for the rest of the process. It is
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct StaticFallback {
    cell: Arc<OnceLock<Arc<Content>>>,
}

impl StaticFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot, creating it on the first call
    pub fn get(&self) -> Arc<Content> {
        self.cell
            .get_or_init(|| {
                let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                Arc::new(bundled_content(now))
            })
            .clone()
    }
}

/// Builds the bundled dashboard with the given generation date
pub fn bundled_content(date: String) -> Content {
    Content {
        date,
        verse: VerseOfDay {
            text: "For we walk by faith, not by sight.".to_string(),
            reference: "2 Corinthians 5:7".to_string(),
            context: "Paul is speaking about the eternal home and the courage believers have."
                .to_string(),
            cross_references: vec!["Hebrews 11:1".to_string(), "Romans 8:24".to_string()],
            gospel_connection:
                "Our faith is anchored in the finished work of Christ, even when unseen."
                    .to_string(),
        },
        passage: Passage {
            reference: "Psalm 23".to_string(),
            text: "The Lord is my shepherd; I shall not want. He makes me lie down in green pastures. He leads me beside still waters. He restores my soul.".to_string(),
            outline: vec![
                "The Shepherd's Provision".to_string(),
                "The Shepherd's Protection".to_string(),
                "The Shepherd's Presence".to_string(),
            ],
            author: "David".to_string(),
            historical_setting:
                "Likely written later in David's life, reflecting on God's faithfulness."
                    .to_string(),
        },
        devotional: Devotional {
            title: "The Steady Walk".to_string(),
            scripture_quote: "For we walk by faith, not by sight.".to_string(),
            short_reflection: format!("{}...", short_reflection(REFLECTION, 100)),
            long_reflection: REFLECTION.to_string(),
            application: "Take 5 minutes of silence today to simply be in God's presence, asking Him for guidance on one specific decision you face.".to_string(),
            prayer_guide: "Lord, help me to trust You with my next step. Silence my fears about the future and ground me in the assurance of Your presence today. Amen.".to_string(),
        },
        questions: ReflectionQuestions {
            heart_check: "Is my heart at rest in God today, or am I anxious?".to_string(),
            belief_check: "Do I truly believe that God is sufficient for my needs?".to_string(),
            obedience_check: "What specific step of obedience is God calling me to take?"
                .to_string(),
        },
        prayer: PrayerFocus {
            focus_theme: "Trust and Surrender".to_string(),
            scripture: "Proverbs 3:5-6".to_string(),
            guided_prayer: "Lord, I choose to trust You with all my heart. Help me not to lean on my own understanding.".to_string(),
        },
        theme: Theme {
            theme: "God's Faithfulness".to_string(),
            key_verse: "Great is Your faithfulness. - Lamentations 3:23".to_string(),
            supporting_verses: vec![
                "Psalm 89:1".to_string(),
                "1 Thessalonians 5:24".to_string(),
                "Deuteronomy 7:9".to_string(),
            ],
        },
        attribute: Attribute {
            attribute: "Immutable".to_string(),
            definition: "God is unchanging in His character, promises, and purposes.".to_string(),
            scripture_proof: "I the Lord do not change. - Malachi 3:6".to_string(),
            worship_response:
                "I praise You, Lord, for being my unchanging Rock in a world of constant change."
                    .to_string(),
        },
        gospel: GospelConnection {
            truth: "Christ died for the ungodly".to_string(),
            reference: "Romans 5:6-8".to_string(),
            explanation: "While we were still sinners, Christ died for us. Salvation is entirely by grace, not by our works or merit.".to_string(),
        },
        history: HistoricalEvent {
            event: "David Anointed as King".to_string(),
            reference: "1 Samuel 16".to_string(),
            description: "God rejects Saul and sends Samuel to anoint David, the youngest son of Jesse, as the future king of Israel.".to_string(),
            timeline: Timeline {
                before: "Saul rejected by God for disobedience".to_string(),
                during: "Samuel anoints David; the Spirit of the Lord comes upon him".to_string(),
                after: "David begins his journey to the throne, learning faithfulness through trials"
                    .to_string(),
            },
        },
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary
fn short_reflection(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_created_once_and_shared() {
        let fallback = StaticFallback::new();
        let first = fallback.get();
        let second = fallback.clone().get();

        assert!(Arc::ptr_eq(&first, &second), "Clones should share one snapshot");
    }

    #[test]
    fn test_fallback_is_dated_at_first_use() {
        let before = Utc::now();
        let fallback = StaticFallback::new();
        let content = fallback.get();

        let stamped = chrono::DateTime::parse_from_rfc3339(&content.date)
            .expect("Fallback date should be RFC 3339");
        assert!(stamped.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_independent_fallbacks_do_not_share() {
        let a = StaticFallback::new().get();
        let b = StaticFallback::new().get();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.verse, b.verse);
    }

    #[test]
    fn test_short_reflection_truncates() {
        let content = bundled_content(String::new());
        assert!(content.devotional.short_reflection.ends_with("..."));
        assert_eq!(content.devotional.short_reflection.chars().count(), 103);
        assert_eq!(short_reflection("abc", 10), "abc");
    }

    #[test]
    fn test_bundled_content_survives_json() {
        let content = bundled_content("2024-01-01T00:00:00.000Z".to_string());
        let json = serde_json::to_string(&content).unwrap();
        let parsed: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, content);
    }
}
