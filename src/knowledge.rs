//! Static disease knowledge table
//!
//! One immutable record per [`DiseaseKey`], compiled into the binary and
//! shared read-only by every analysis. `Healthy` and `NotACrop` double as
//! the fallback and rejection sentinels of the classifier.

use serde::{Deserialize, Serialize};

/// Closed set of diagnoses the engine can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseKey {
    Healthy,
    PowderyMildew,
    BacterialBlight,
    VerticilliumWilt,
    LeafRust,
    ViralInfection,
    SeptoriaLeafSpot,
    Anthracnose,
    TomatoLeafMold,
    PotatoLateBlight,
    NotACrop,
}

/// Fixed severity tier of a disease record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Medium,
    High,
    Critical,
}

/// Remediation advice attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationBundle {
    pub pesticides: &'static [&'static str],
    pub preventive_steps: &'static [&'static str],
    pub organic_solutions: &'static [&'static str],
}

/// One entry of the knowledge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub key: DiseaseKey,
    /// Display name
    pub name: &'static str,
    pub scientific_name: Option<&'static str>,
    /// Pathogen class, e.g. "Fungal"
    pub pathogen: Option<&'static str>,
    /// Crops the disease is typically reported on
    pub crop: &'static str,
    pub severity: Severity,
    pub recommendations: RecommendationBundle,
}

impl DiseaseKey {
    /// Every key, in table order
    pub const ALL: [DiseaseKey; 11] = [
        DiseaseKey::Healthy,
        DiseaseKey::PowderyMildew,
        DiseaseKey::BacterialBlight,
        DiseaseKey::VerticilliumWilt,
        DiseaseKey::LeafRust,
        DiseaseKey::ViralInfection,
        DiseaseKey::SeptoriaLeafSpot,
        DiseaseKey::Anthracnose,
        DiseaseKey::TomatoLeafMold,
        DiseaseKey::PotatoLateBlight,
        DiseaseKey::NotACrop,
    ];

    /// Stable snake_case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseKey::Healthy => "healthy",
            DiseaseKey::PowderyMildew => "powdery_mildew",
            DiseaseKey::BacterialBlight => "bacterial_blight",
            DiseaseKey::VerticilliumWilt => "verticillium_wilt",
            DiseaseKey::LeafRust => "leaf_rust",
            DiseaseKey::ViralInfection => "viral_infection",
            DiseaseKey::SeptoriaLeafSpot => "septoria_leaf_spot",
            DiseaseKey::Anthracnose => "anthracnose",
            DiseaseKey::TomatoLeafMold => "tomato_leaf_mold",
            DiseaseKey::PotatoLateBlight => "potato_late_blight",
            DiseaseKey::NotACrop => "not_a_crop",
        }
    }

    /// Parse a snake_case identifier
    pub fn from_str_key(key: &str) -> Option<DiseaseKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Find the key whose record has the given display name
    pub fn from_display_name(name: &str) -> Option<DiseaseKey> {
        Self::ALL.into_iter().find(|k| k.record().name == name)
    }

    /// Table record for this key
    pub fn record(&self) -> &'static DiseaseRecord {
        match self {
            DiseaseKey::Healthy => &HEALTHY,
            DiseaseKey::PowderyMildew => &POWDERY_MILDEW,
            DiseaseKey::BacterialBlight => &BACTERIAL_BLIGHT,
            DiseaseKey::VerticilliumWilt => &VERTICILLIUM_WILT,
            DiseaseKey::LeafRust => &LEAF_RUST,
            DiseaseKey::ViralInfection => &VIRAL_INFECTION,
            DiseaseKey::SeptoriaLeafSpot => &SEPTORIA_LEAF_SPOT,
            DiseaseKey::Anthracnose => &ANTHRACNOSE,
            DiseaseKey::TomatoLeafMold => &TOMATO_LEAF_MOLD,
            DiseaseKey::PotatoLateBlight => &POTATO_LATE_BLIGHT,
            DiseaseKey::NotACrop => &NOT_A_CROP,
        }
    }
}

impl std::fmt::Display for DiseaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static HEALTHY: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::Healthy,
    name: "Healthy",
    scientific_name: None,
    pathogen: None,
    crop: "General Plant",
    severity: Severity::None,
    recommendations: RecommendationBundle {
        pesticides: &[],
        preventive_steps: &[
            "Continue regular monitoring",
            "Maintain proper irrigation",
            "Apply balanced fertilizers",
        ],
        organic_solutions: &[],
    },
};

static POWDERY_MILDEW: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::PowderyMildew,
    name: "Powdery Mildew",
    scientific_name: Some("Podosphaera xanthii / Erysiphe cichoracearum"),
    pathogen: Some("Fungal"),
    crop: "Multiple Crops",
    severity: Severity::Medium,
    recommendations: RecommendationBundle {
        pesticides: &["Sulfur-based fungicides", "Potassium bicarbonate", "Myclobutanil"],
        preventive_steps: &[
            "Select resistant varieties",
            "Improve air circulation",
            "Avoid overhead watering",
            "Remove infected plant debris",
        ],
        organic_solutions: &["Milk spray (1:10 ratio)", "Baking soda solution", "Neem oil"],
    },
};

static BACTERIAL_BLIGHT: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::BacterialBlight,
    name: "Bacterial Blight",
    scientific_name: Some("Xanthomonas axonopodis pv. malvacearum"),
    pathogen: Some("Bacterial"),
    crop: "Cotton / Beans",
    severity: Severity::High,
    recommendations: RecommendationBundle {
        pesticides: &[
            "Copper-based bactericides (preventative)",
            "Streptomycin (limited use)",
        ],
        preventive_steps: &[
            "Use disease-free seeds",
            "Practice crop rotation",
            "Avoid working in wet fields",
            "Disinfect tools regularly",
        ],
        organic_solutions: &[
            "Copper soap",
            "Biological controls (Bacillus subtilis)",
            "Remove infected leaves immediately",
        ],
    },
};

static VERTICILLIUM_WILT: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::VerticilliumWilt,
    name: "Verticillium Wilt",
    scientific_name: Some("Verticillium dahliae"),
    pathogen: Some("Soil-borne Fungal"),
    crop: "Cotton / Tomato / Potato",
    severity: Severity::High,
    recommendations: RecommendationBundle {
        pesticides: &["Slow recovery potential - chemicals limited"],
        preventive_steps: &[
            "Soil solarization",
            "Long-term crop rotation (3-4 years)",
            "Plant resistant varieties",
            "Control nematode populations",
        ],
        organic_solutions: &[
            "Soil amendments with compost",
            "Bio-fungicides (Trichoderma)",
            "Remove and destroy entire infected plants",
        ],
    },
};

static LEAF_RUST: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::LeafRust,
    name: "Leaf Rust",
    scientific_name: Some("Puccinia graminis / Puccinia triticina"),
    pathogen: Some("Fungal (Biotrophic)"),
    crop: "Cotton / Corn / Wheat",
    severity: Severity::Medium,
    recommendations: RecommendationBundle {
        pesticides: &["Azoxystrobin", "Propiconazole", "Mancozeb"],
        preventive_steps: &[
            "Plant resistant hybrids",
            "Monitor nutrient levels (avoid excess N)",
            "Apply fungicides at early signs",
        ],
        organic_solutions: &["Sulfur dust", "Neem oil", "Remove alternate hosts/weeds"],
    },
};

static VIRAL_INFECTION: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::ViralInfection,
    name: "Viral Mosaic / Chlorosis",
    scientific_name: None,
    pathogen: None,
    crop: "General",
    severity: Severity::High,
    recommendations: RecommendationBundle {
        pesticides: &[
            "Control insect vectors (aphids/thrips)",
            "No direct chemical cure for virus",
        ],
        preventive_steps: &[
            "Use virus-free certified seeds",
            "Control weeds",
            "Disinfect tools",
            "Remove infected plants immediately (roguing)",
        ],
        organic_solutions: &[
            "Neem oil to repel vectors",
            "Reflective mulches",
            "Milk spray to prevent mechanical transmission",
        ],
    },
};

static SEPTORIA_LEAF_SPOT: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::SeptoriaLeafSpot,
    name: "Septoria Leaf Spot",
    scientific_name: None,
    pathogen: None,
    crop: "Tomato / Wheat",
    severity: Severity::Medium,
    recommendations: RecommendationBundle {
        pesticides: &["Chlorothalonil", "Copper fungicides", "Mancozeb"],
        preventive_steps: &[
            "Crop rotation",
            "Mulching to prevent soil splash",
            "Water at base of plant",
            "Remove lower leaves",
        ],
        organic_solutions: &["Copper spray", "Biological fungicides", "Enhanced air circulation"],
    },
};

static ANTHRACNOSE: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::Anthracnose,
    name: "Anthracnose",
    scientific_name: Some("Colletotrichum gloeosporioides"),
    pathogen: Some("Fungal"),
    crop: "Berries / Beans",
    severity: Severity::Medium,
    recommendations: RecommendationBundle {
        pesticides: &["Captan", "Chlorothalonil", "Benomyl"],
        preventive_steps: &[
            "Use resistant varieties",
            "Crop rotation",
            "Proper drainage",
            "Remove infected fruit/twigs",
        ],
        organic_solutions: &["Copper fungicides", "Neem oil", "Hot water seed treatment"],
    },
};

static TOMATO_LEAF_MOLD: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::TomatoLeafMold,
    name: "Tomato Leaf Mold",
    scientific_name: None,
    pathogen: None,
    crop: "Tomato",
    severity: Severity::Medium,
    recommendations: RecommendationBundle {
        pesticides: &[
            "Chlorothalonil (Daconil)",
            "Copper-based fungicide (Bordeaux mixture)",
            "Mancozeb",
        ],
        preventive_steps: &[
            "Improve air circulation (pruning)",
            "Water at roots",
            "Clean greenhouse structures",
        ],
        organic_solutions: &["Neem oil spray", "Baking soda solution", "Compost tea"],
    },
};

static POTATO_LATE_BLIGHT: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::PotatoLateBlight,
    name: "Late Blight",
    scientific_name: Some("Phytophthora infestans"),
    pathogen: Some("Oomycete (Fungal-like)"),
    crop: "Potato",
    severity: Severity::Critical,
    recommendations: RecommendationBundle {
        pesticides: &["Ridomil Gold", "Mancozeb", "Chlorothalonil"],
        preventive_steps: &[
            "Destroy culled potatoes",
            "Plant certified seed",
            "Monitor weather (cool/wet favors blight)",
            "Kill vines before harvest",
        ],
        organic_solutions: &["Copper products", "Hydrogen dioxide", "Compost tea"],
    },
};

static NOT_A_CROP: DiseaseRecord = DiseaseRecord {
    key: DiseaseKey::NotACrop,
    name: "Not a Crop",
    scientific_name: None,
    pathogen: None,
    crop: "Unknown Object",
    severity: Severity::None,
    recommendations: RecommendationBundle {
        pesticides: &[],
        preventive_steps: &[
            "Please upload a clear image of a crop leaf",
            "Ensure the image is well-lit",
            "Focus on the plant tissue",
        ],
        organic_solutions: &[],
    },
};
