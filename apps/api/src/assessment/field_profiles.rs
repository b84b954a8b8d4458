//! Per-field and per-niche domain tables spliced into scenario and analysis prompts.
//!
//! A field is a broad professional domain ("technology"); a niche is a
//! specialization inside it ("web-development"). Free-form field names from the
//! client are normalised to one of the canonical keys below; anything unknown
//! maps to `general`.

pub const GENERAL: &str = "general";

#[derive(Debug)]
pub struct NicheProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub vocabulary: &'static [&'static str],
    pub stakeholders: &'static [&'static str],
    pub challenge_types: &'static [&'static str],
}

#[derive(Debug)]
pub struct FieldProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    aliases: &'static [&'static str],
    pub vocabulary: &'static [&'static str],
    pub stakeholders: &'static [&'static str],
    pub challenge_types: &'static [&'static str],
    pub niches: &'static [NicheProfile],
}

static FIELDS: &[FieldProfile] = &[
    FieldProfile {
        key: "technology",
        display_name: "Technology",
        aliases: &["tech", "it", "software", "information technology", "computing"],
        vocabulary: &["sprint", "deployment", "code review", "technical debt", "incident", "API"],
        stakeholders: &["product manager", "engineering lead", "QA engineer", "customer support", "CTO"],
        challenge_types: &[
            "a production incident under time pressure",
            "disagreement over a technical approach",
            "scope creep late in a sprint",
            "mentoring a struggling junior colleague",
        ],
        niches: &[
            NicheProfile {
                key: "web-development",
                display_name: "Web Development",
                vocabulary: &["frontend", "accessibility", "page load time", "browser compatibility"],
                stakeholders: &["UX designer", "client", "backend developer"],
                challenge_types: &["a client demanding a redesign days before launch"],
            },
            NicheProfile {
                key: "data-science",
                display_name: "Data Science",
                vocabulary: &["model accuracy", "data pipeline", "A/B test", "feature engineering"],
                stakeholders: &["business analyst", "data engineer", "executive sponsor"],
                challenge_types: &["results that contradict what leadership expects"],
            },
            NicheProfile {
                key: "cybersecurity",
                display_name: "Cybersecurity",
                vocabulary: &["vulnerability", "phishing", "access control", "compliance audit"],
                stakeholders: &["security analyst", "legal counsel", "system administrator"],
                challenge_types: &["a suspected breach reported by an employee"],
            },
        ],
    },
    FieldProfile {
        key: "healthcare",
        display_name: "Healthcare",
        aliases: &["health", "medical", "medicine", "clinical", "nursing"],
        vocabulary: &["patient care", "shift handover", "treatment plan", "clinical protocol", "triage"],
        stakeholders: &["patient", "patient's family", "attending physician", "charge nurse", "administrator"],
        challenge_types: &[
            "a patient safety concern",
            "conflict between a family's wishes and the care plan",
            "understaffing during a busy shift",
            "a colleague not following protocol",
        ],
        niches: &[
            NicheProfile {
                key: "nursing",
                display_name: "Nursing",
                vocabulary: &["medication round", "vital signs", "care plan", "ward"],
                stakeholders: &["ward manager", "physician", "patient"],
                challenge_types: &["two urgent patients needing attention at once"],
            },
            NicheProfile {
                key: "clinical-research",
                display_name: "Clinical Research",
                vocabulary: &["trial protocol", "informed consent", "adverse event", "enrollment target"],
                stakeholders: &["principal investigator", "study sponsor", "ethics board"],
                challenge_types: &["pressure to enroll participants who barely meet criteria"],
            },
            NicheProfile {
                key: "health-administration",
                display_name: "Health Administration",
                vocabulary: &["budget", "bed occupancy", "regulatory inspection", "staffing rota"],
                stakeholders: &["department heads", "finance director", "regulator"],
                challenge_types: &["budget cuts that affect frontline staff"],
            },
        ],
    },
    FieldProfile {
        key: "business",
        display_name: "Business",
        aliases: &["finance", "management", "marketing", "sales", "consulting", "commerce"],
        vocabulary: &["quarterly targets", "stakeholder", "budget", "KPI", "pipeline", "forecast"],
        stakeholders: &["client", "department head", "sales team", "finance team", "CEO"],
        challenge_types: &[
            "a key client threatening to leave",
            "a missed quarterly target",
            "competing priorities between departments",
            "an ethical grey area in a deal",
        ],
        niches: &[
            NicheProfile {
                key: "finance",
                display_name: "Finance",
                vocabulary: &["variance analysis", "audit", "cash flow", "risk exposure"],
                stakeholders: &["CFO", "auditor", "investor"],
                challenge_types: &["a spreadsheet error discovered after figures were published"],
            },
            NicheProfile {
                key: "marketing",
                display_name: "Marketing",
                vocabulary: &["campaign", "conversion rate", "brand voice", "audience segment"],
                stakeholders: &["creative agency", "brand manager", "social media team"],
                challenge_types: &["a campaign that sparks public backlash"],
            },
            NicheProfile {
                key: "project-management",
                display_name: "Project Management",
                vocabulary: &["milestone", "critical path", "risk register", "change request"],
                stakeholders: &["project sponsor", "vendor", "delivery team"],
                challenge_types: &["a vendor slipping on a critical-path deliverable"],
            },
        ],
    },
    FieldProfile {
        key: "creative",
        display_name: "Creative Arts & Design",
        aliases: &["design", "arts", "art", "media", "creative arts", "writing"],
        vocabulary: &["brief", "concept", "revision round", "portfolio", "creative direction"],
        stakeholders: &["client", "art director", "copywriter", "producer", "audience"],
        challenge_types: &[
            "harsh feedback on work you are proud of",
            "a client who keeps changing the brief",
            "a tight deadline that threatens quality",
            "credit for creative work being disputed",
        ],
        niches: &[
            NicheProfile {
                key: "graphic-design",
                display_name: "Graphic Design",
                vocabulary: &["typography", "brand guidelines", "mock-up", "print proof"],
                stakeholders: &["brand manager", "printer", "marketing lead"],
                challenge_types: &["a print run with an error discovered after approval"],
            },
            NicheProfile {
                key: "content-writing",
                display_name: "Content Writing",
                vocabulary: &["editorial calendar", "SEO", "tone of voice", "fact check"],
                stakeholders: &["editor", "subject-matter expert", "readers"],
                challenge_types: &["an expert source who wants to rewrite your article"],
            },
            NicheProfile {
                key: "ux-design",
                display_name: "UX Design",
                vocabulary: &["user research", "prototype", "usability test", "design system"],
                stakeholders: &["product manager", "developers", "test participants"],
                challenge_types: &["research findings that contradict the product roadmap"],
            },
        ],
    },
    FieldProfile {
        key: "education",
        display_name: "Education",
        aliases: &["teaching", "training", "academia", "academic", "school"],
        vocabulary: &["lesson plan", "curriculum", "assessment", "learning outcomes", "classroom"],
        stakeholders: &["students", "parents", "head of department", "principal", "teaching assistant"],
        challenge_types: &[
            "a disruptive student",
            "a parent complaint about grading",
            "a curriculum change with little notice",
            "a colleague struggling with workload",
        ],
        niches: &[
            NicheProfile {
                key: "k12-teaching",
                display_name: "K-12 Teaching",
                vocabulary: &["homeroom", "parent-teacher conference", "differentiated instruction"],
                stakeholders: &["parents", "school counsellor", "principal"],
                challenge_types: &["a student who suddenly stops engaging"],
            },
            NicheProfile {
                key: "higher-education",
                display_name: "Higher Education",
                vocabulary: &["lecture", "office hours", "research grant", "peer review"],
                stakeholders: &["graduate students", "department chair", "grant committee"],
                challenge_types: &["suspected plagiarism by a strong student"],
            },
            NicheProfile {
                key: "corporate-training",
                display_name: "Corporate Training",
                vocabulary: &["onboarding", "workshop", "learning management system", "skills matrix"],
                stakeholders: &["HR business partner", "line managers", "new hires"],
                challenge_types: &["senior staff dismissing a mandatory training"],
            },
        ],
    },
];

static GENERAL_PROFILE: FieldProfile = FieldProfile {
    key: GENERAL,
    display_name: "a general professional setting",
    aliases: &[],
    vocabulary: &["deadline", "team meeting", "feedback", "priorities", "process"],
    stakeholders: &["manager", "colleague", "customer", "new team member"],
    challenge_types: &[
        "a conflict between two colleagues",
        "an unrealistic deadline",
        "a mistake you discover in your own work",
        "an unclear change in direction from leadership",
    ],
    niches: &[],
};

/// Resolves a free-form field name to its profile. Exact keys and aliases win;
/// otherwise a field whose key or multi-letter alias appears in the input is used.
pub fn field_profile(field: &str) -> &'static FieldProfile {
    let wanted = field.trim().to_lowercase();

    let exact = FIELDS
        .iter()
        .find(|p| p.key == wanted || p.aliases.contains(&wanted.as_str()));
    if let Some(profile) = exact {
        return profile;
    }

    FIELDS
        .iter()
        .find(|p| {
            wanted.contains(p.key)
                || p
                    .aliases
                    .iter()
                    .filter(|a| a.len() > 3)
                    .any(|a| wanted.contains(a))
        })
        .unwrap_or(&GENERAL_PROFILE)
}

/// Canonical key for a free-form field name.
pub fn canonical_field(field: &str) -> &'static str {
    field_profile(field).key
}

/// Everything a prompt needs to know about the domain, niche entries first.
#[derive(Debug, Clone)]
pub struct DomainContext {
    pub field_name: &'static str,
    pub niche_name: Option<&'static str>,
    pub vocabulary: Vec<&'static str>,
    pub stakeholders: Vec<&'static str>,
    pub challenge_types: Vec<&'static str>,
}

impl DomainContext {
    pub fn resolve(field: &str, niche: Option<&str>) -> Self {
        let profile = field_profile(field);
        let niche = niche.and_then(|n| {
            let wanted = n.trim().to_lowercase().replace([' ', '_'], "-");
            profile.niches.iter().find(|p| p.key == wanted)
        });

        DomainContext {
            field_name: profile.display_name,
            niche_name: niche.map(|n| n.display_name),
            vocabulary: merge(niche.map(|n| n.vocabulary), profile.vocabulary),
            stakeholders: merge(niche.map(|n| n.stakeholders), profile.stakeholders),
            challenge_types: merge(
                niche.map(|n| n.challenge_types),
                profile.challenge_types,
            ),
        }
    }

    /// Picks a challenge focus by index so a batch can spread across challenge types.
    pub fn challenge_focus(&self, index: usize) -> &'static str {
        self.challenge_types[index % self.challenge_types.len()]
    }

    /// One-paragraph summary used by analysis prompts.
    pub fn summary(&self) -> String {
        let niche = self
            .niche_name
            .map(|n| format!(" (specialising in {n})"))
            .unwrap_or_default();
        format!(
            "{}{}. Typical vocabulary: {}. Typical stakeholders: {}.",
            self.field_name,
            niche,
            self.vocabulary.join(", "),
            self.stakeholders.join(", ")
        )
    }
}

fn merge(
    first: Option<&'static [&'static str]>,
    rest: &'static [&'static str],
) -> Vec<&'static str> {
    let mut items: Vec<&'static str> = first.unwrap_or_default().to_vec();
    for &item in rest {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keys_and_aliases_resolve() {
        assert_eq!(canonical_field("Technology"), "technology");
        assert_eq!(canonical_field("IT"), "technology");
        assert_eq!(canonical_field("  medical "), "healthcare");
        assert_eq!(canonical_field("Finance"), "business");
        assert_eq!(canonical_field("design"), "creative");
        assert_eq!(canonical_field("teaching"), "education");
    }

    #[test]
    fn test_compound_names_resolve_by_containment() {
        assert_eq!(canonical_field("Healthcare & Life Sciences"), "healthcare");
        assert_eq!(canonical_field("Software Engineering"), "technology");
    }

    #[test]
    fn test_short_alias_does_not_match_inside_words() {
        // "it" must not pull "Hospitality" into technology
        assert_eq!(canonical_field("Hospitality"), GENERAL);
    }

    #[test]
    fn test_unknown_field_is_general() {
        assert_eq!(canonical_field("Underwater Basket Weaving"), GENERAL);
        assert_eq!(canonical_field(""), GENERAL);
    }

    #[test]
    fn test_niche_entries_come_first_without_duplicates() {
        let ctx = DomainContext::resolve("technology", Some("Web Development"));
        assert_eq!(ctx.niche_name, Some("Web Development"));
        assert_eq!(ctx.vocabulary[0], "frontend");
        assert!(ctx.vocabulary.contains(&"sprint"));
        assert_eq!(ctx.challenge_types[0], "a client demanding a redesign days before launch");

        let mut seen = std::collections::HashSet::new();
        assert!(ctx.stakeholders.iter().all(|s| seen.insert(*s)));
    }

    #[test]
    fn test_unknown_niche_falls_back_to_field_tables() {
        let ctx = DomainContext::resolve("healthcare", Some("veterinary"));
        assert!(ctx.niche_name.is_none());
        assert_eq!(ctx.vocabulary, field_profile("healthcare").vocabulary.to_vec());
    }

    #[test]
    fn test_challenge_focus_cycles() {
        let ctx = DomainContext::resolve("education", None);
        let n = ctx.challenge_types.len();
        assert_eq!(ctx.challenge_focus(0), ctx.challenge_focus(n));
        assert_ne!(ctx.challenge_focus(0), ctx.challenge_focus(1));
    }

    #[test]
    fn test_every_field_has_enough_material() {
        for profile in FIELDS.iter().chain(std::iter::once(&GENERAL_PROFILE)) {
            assert!(!profile.vocabulary.is_empty(), "{} vocabulary", profile.key);
            assert!(!profile.stakeholders.is_empty(), "{} stakeholders", profile.key);
            assert!(profile.challenge_types.len() >= 3, "{} challenges", profile.key);
        }
    }
}
