// Stop-word sets used by the normalizer.
//
// The curated list is bundled with the crate: common English and Russian
// function words. The extended list adds the full English and Russian
// lists from the `stop-words` crate on top of it. Both sets are built once
// and shared read-only.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};

/// Which stop-word set a normalizer filters against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWordList {
    /// The bundled English + Russian function-word list (default)
    #[default]
    Curated,
    /// Curated list plus the `stop-words` crate's English and Russian lists
    Extended,
}

impl StopWordList {
    /// The shared, lowercase stop-word set for this list.
    pub fn words(self) -> &'static HashSet<String> {
        match self {
            StopWordList::Curated => &CURATED,
            StopWordList::Extended => &EXTENDED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopWordList::Curated => "curated",
            StopWordList::Extended => "extended",
        }
    }
}

impl FromStr for StopWordList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curated" => Ok(StopWordList::Curated),
            "extended" => Ok(StopWordList::Extended),
            other => Err(format!(
                "unknown stop-word list {other:?} (expected \"curated\" or \"extended\")"
            )),
        }
    }
}

const ENGLISH: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "this",
];

const RUSSIAN: &[&str] = &[
    "это", "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все",
    "она", "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только",
    "ее", "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь",
    "когда", "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него",
    "до", "вас", "нибудь", "уж", "вам", "сказал", "ведь", "там", "потом", "себя", "ничего",
    "ей", "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их",
    "чем", "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под",
    "будет", "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были", "куда",
    "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой", "хоть",
    "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них", "какая",
    "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой", "перед",
    "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда", "конечно",
    "всю", "между",
];

static CURATED: LazyLock<HashSet<String>> = LazyLock::new(|| {
    ENGLISH
        .iter()
        .chain(RUSSIAN.iter())
        .map(|w| w.to_string())
        .collect()
});

static EXTENDED: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut words = CURATED.clone();
    for language in [LANGUAGE::English, LANGUAGE::Russian] {
        let list: Vec<String> = get(language);
        words.extend(list.into_iter().map(|w| w.to_lowercase()));
    }
    words
});
