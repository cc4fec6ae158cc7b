use std::collections::BTreeMap;

pub const DISCOUNT_WORDS: [&str; 5] = ["%", "off", "sale", "ventes flash", "deal"];
pub const QUALITY_WORDS: [&str; 3] = ["qualité", "bambou", "ultra-doux"];
pub const GUARANTEE_WORDS: [&str; 3] = ["remboursé", "garantie", "try"];
pub const POP_RIDE_PHRASES: [&str; 2] = ["pop underwear", "ride moi"];

const PAIN_POINTS: [(&str, &[&str]); 5] = [
    (
        "underwear",
        &[
            "inconfort",
            "irrite",
            "invisible",
            "mauvaise qualité",
            "sensation",
            "pop underwear",
            "ride moi",
        ],
    ),
    (
        "fashion",
        &[
            "taille",
            "coupe",
            "style",
            "durabilité",
            "dernier cri",
            "tendance",
            "vieux",
            "démodé",
        ],
    ),
    (
        "beauty",
        &[
            "rides",
            "imperfections",
            "sécheresse",
            "âge",
            "éclat",
            "boutons",
            "acné",
            "hydratation",
            "cernes",
        ],
    ),
    (
        "fitness",
        &[
            "fatigue",
            "douleur",
            "stagnation",
            "perte de poids",
            "motivation",
            "résultats",
            "calories",
            "régime",
        ],
    ),
    (
        "tech",
        &[
            "lent",
            "bug",
            "complexe",
            "sécurité",
            "obsolète",
            "mise à jour",
            "batterie",
            "wifi",
            "piraté",
        ],
    ),
];

const INCENTIVES: [&str; 19] = [
    "réduction",
    "rabais",
    "offre",
    "promo",
    "soldes",
    "gratuit",
    "free",
    "%",
    "off",
    "deal",
    "code",
    "coupon",
    "exclusif",
    "achetez",
    "magasinez",
    "shop",
    "économiser",
    "maintenant",
    "dernier chance",
];

/// Industry pain points and purchase incentives matched against visible words.
#[derive(Debug, Clone, PartialEq)]
pub struct Keywords {
    pub pain_points: BTreeMap<String, Vec<String>>,
    pub incentives: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        let pain_points = PAIN_POINTS
            .iter()
            .map(|(industry, phrases)| {
                (
                    industry.to_string(),
                    phrases.iter().map(|phrase| phrase.to_string()).collect(),
                )
            })
            .collect();
        Self {
            pain_points,
            incentives: INCENTIVES.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl Keywords {
    /// `None` when the industry has no dictionary entry.
    pub fn pain_points_for(&self, industry: &str) -> Option<&[String]> {
        self.pain_points.get(industry).map(Vec::as_slice)
    }
}

/// Case-insensitive substring match; `haystack` must already be lower-cased.
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|needle| {
        let needle = needle.as_ref().to_lowercase();
        haystack.contains(needle.as_str())
    })
}
