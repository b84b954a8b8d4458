//! Hand-authored workplace scenarios served when the model cannot write one.
//! Every field has at least three entries; `general` covers unknown fields.

use crate::models::assessment::{ScenarioOption, ScenarioVariant};

pub struct CannedOption {
    pub id: &'static str,
    pub text: &'static str,
    pub skills: &'static [&'static str],
    pub traits: &'static [&'static str],
}

pub struct CannedScenario {
    pub title: &'static str,
    pub context: &'static str,
    pub challenge: &'static str,
    pub options: &'static [CannedOption],
    pub follow_up: &'static [&'static str],
}

impl CannedScenario {
    pub fn to_variant(&self) -> ScenarioVariant {
        ScenarioVariant {
            title: self.title.to_string(),
            context: self.context.to_string(),
            challenge: self.challenge.to_string(),
            options: self
                .options
                .iter()
                .map(|o| ScenarioOption {
                    id: o.id.to_string(),
                    text: o.text.to_string(),
                    skills: o.skills.iter().map(|s| s.to_string()).collect(),
                    traits: o.traits.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
            follow_up_questions: self.follow_up.iter().map(|q| q.to_string()).collect(),
        }
    }
}

const REFLECT_ON_CHOICE: &str = "What would make you choose differently next time?";

static TECHNOLOGY: &[CannedScenario] = &[
    CannedScenario {
        title: "The Friday Night Outage",
        context: "A release went out on Friday afternoon. At 9pm the error rate on the payments service triples and customers start complaining on social media.",
        challenge: "You are the most senior engineer online and the release owner is not answering.",
        options: &[
            CannedOption { id: "a", text: "Roll back the release immediately, then investigate", skills: &["risk management", "decision making"], traits: &["cautious", "decisive"] },
            CannedOption { id: "b", text: "Dig into the logs and ship a targeted fix", skills: &["problem solving", "technical depth"], traits: &["independent", "analytical"] },
            CannedOption { id: "c", text: "Open an incident channel and pull in on-call support", skills: &["coordination", "communication"], traits: &["collaborative"] },
            CannedOption { id: "d", text: "Post a status update first so customers know you are on it", skills: &["customer focus", "communication"], traits: &["empathetic"] },
        ],
        follow_up: &["Who would you inform on Monday, and how?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Architecture Stand-off",
        context: "Two senior engineers disagree about whether to split a monolith into services. The debate has stalled the team for two sprints.",
        challenge: "Your manager asks you to get the team unstuck by the end of the week.",
        options: &[
            CannedOption { id: "a", text: "Run a time-boxed spike to test both approaches", skills: &["critical thinking", "experimentation"], traits: &["analytical", "pragmatic"] },
            CannedOption { id: "b", text: "Facilitate a decision meeting with clear criteria", skills: &["facilitation", "leadership"], traits: &["diplomatic"] },
            CannedOption { id: "c", text: "Write a design document weighing the trade-offs", skills: &["written communication", "systems thinking"], traits: &["methodical"] },
            CannedOption { id: "d", text: "Pick the lower-risk option and move on", skills: &["decision making"], traits: &["decisive"] },
        ],
        follow_up: &["How would you keep the engineer whose idea lost engaged?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Junior Who Went Quiet",
        context: "A junior developer on your team has stopped asking questions and their pull requests are getting larger and later.",
        challenge: "Their latest change has a serious bug and is due for review today.",
        options: &[
            CannedOption { id: "a", text: "Pair with them on the fix and talk about how things are going", skills: &["mentoring", "empathy"], traits: &["supportive"] },
            CannedOption { id: "b", text: "Leave detailed review comments and let them fix it", skills: &["code review", "written communication"], traits: &["structured"] },
            CannedOption { id: "c", text: "Suggest splitting work into smaller pull requests from now on", skills: &["process improvement"], traits: &["pragmatic"] },
            CannedOption { id: "d", text: "Raise it with your lead so they can support the developer", skills: &["escalation judgement"], traits: &["cautious"] },
        ],
        follow_up: &["What signs would tell you the situation is improving?", REFLECT_ON_CHOICE],
    },
];

static HEALTHCARE: &[CannedScenario] = &[
    CannedScenario {
        title: "The Missed Allergy",
        context: "During a shift handover you notice a patient's chart lists a penicillin allergy, but the medication prescribed this morning is amoxicillin.",
        challenge: "The next dose is due in fifteen minutes and the prescribing doctor is in surgery.",
        options: &[
            CannedOption { id: "a", text: "Hold the dose and page the on-call physician", skills: &["patient safety", "escalation judgement"], traits: &["cautious", "responsible"] },
            CannedOption { id: "b", text: "Check with the patient and pharmacy before acting", skills: &["critical thinking", "communication"], traits: &["thorough"] },
            CannedOption { id: "c", text: "Report it to the charge nurse and document the concern", skills: &["documentation", "teamwork"], traits: &["methodical"] },
            CannedOption { id: "d", text: "Hold the dose and file an incident report afterwards", skills: &["compliance", "patient safety"], traits: &["principled"] },
        ],
        follow_up: &["How would you raise this with the prescribing doctor later?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Family Disagreement",
        context: "An elderly patient wants to go home, but their adult children insist on a care-home placement and are becoming angry with staff.",
        challenge: "The family asks you directly to 'make the patient see sense'.",
        options: &[
            CannedOption { id: "a", text: "Arrange a meeting with the care team, the patient and the family", skills: &["facilitation", "communication"], traits: &["diplomatic"] },
            CannedOption { id: "b", text: "Explain calmly that the patient's wishes come first", skills: &["advocacy", "ethics"], traits: &["principled"] },
            CannedOption { id: "c", text: "Listen to the family's worries and take them to the team", skills: &["empathy", "active listening"], traits: &["empathetic"] },
            CannedOption { id: "d", text: "Ask social work to assess the home situation", skills: &["resourcefulness"], traits: &["pragmatic"] },
        ],
        follow_up: &["What would you do if the patient's capacity were in doubt?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "Short-Staffed Saturday",
        context: "Two colleagues called in sick and the ward is at full capacity. A new admission is arriving from the emergency department.",
        challenge: "You have to decide how the remaining staff cover the shift.",
        options: &[
            CannedOption { id: "a", text: "Triage patients by acuity and reassign workloads", skills: &["prioritization", "clinical judgement"], traits: &["analytical", "decisive"] },
            CannedOption { id: "b", text: "Call the staffing office for agency cover", skills: &["resourcefulness", "escalation judgement"], traits: &["proactive"] },
            CannedOption { id: "c", text: "Huddle the team and agree a plan together", skills: &["teamwork", "leadership"], traits: &["collaborative"] },
            CannedOption { id: "d", text: "Take on the new admission yourself to protect the team", skills: &["resilience"], traits: &["self-sacrificing"] },
        ],
        follow_up: &["How would you check on the team's wellbeing after the shift?", REFLECT_ON_CHOICE],
    },
];

static BUSINESS: &[CannedScenario] = &[
    CannedScenario {
        title: "The Client Who Wants Out",
        context: "Your largest client emails that they are reviewing other suppliers after two late deliveries this quarter.",
        challenge: "The contract renewal meeting is next week and your director wants a plan by tomorrow.",
        options: &[
            CannedOption { id: "a", text: "Call the client today to listen before proposing anything", skills: &["relationship management", "active listening"], traits: &["empathetic"] },
            CannedOption { id: "b", text: "Analyse the root cause of the delays and present fixes", skills: &["analysis", "problem solving"], traits: &["analytical"] },
            CannedOption { id: "c", text: "Offer a discount on the renewal to buy goodwill", skills: &["negotiation"], traits: &["pragmatic"] },
            CannedOption { id: "d", text: "Bring operations and sales together on a recovery plan", skills: &["cross-functional coordination", "leadership"], traits: &["collaborative"] },
        ],
        follow_up: &["What would you promise the client, and what would you avoid promising?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Optimistic Forecast",
        context: "Your manager asks you to present a sales forecast to the board. The numbers they want shown are well above what your pipeline supports.",
        challenge: "The presentation is in two days.",
        options: &[
            CannedOption { id: "a", text: "Show your manager the data and propose a realistic range", skills: &["data literacy", "communication"], traits: &["honest", "diplomatic"] },
            CannedOption { id: "b", text: "Present both scenarios with their assumptions spelled out", skills: &["financial modelling", "transparency"], traits: &["principled"] },
            CannedOption { id: "c", text: "Use the manager's numbers but flag the risks in writing", skills: &["risk management"], traits: &["cautious"] },
            CannedOption { id: "d", text: "Look for pipeline opportunities that could close the gap", skills: &["business development"], traits: &["optimistic", "driven"] },
        ],
        follow_up: &["How would you handle it if your manager insisted?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "Two Departments, One Budget",
        context: "Marketing and product each need the remaining quarterly budget for launches they say are critical.",
        challenge: "You were asked to recommend how the money should be split.",
        options: &[
            CannedOption { id: "a", text: "Compare expected return on each launch and recommend one", skills: &["analysis", "decision making"], traits: &["analytical", "decisive"] },
            CannedOption { id: "b", text: "Bring both leads together to find a shared plan", skills: &["negotiation", "facilitation"], traits: &["collaborative"] },
            CannedOption { id: "c", text: "Split the budget with milestones that release more funds", skills: &["financial planning", "creativity"], traits: &["pragmatic"] },
            CannedOption { id: "d", text: "Escalate to leadership with a summary of both cases", skills: &["stakeholder management"], traits: &["cautious"] },
        ],
        follow_up: &["What data would you want before deciding?", REFLECT_ON_CHOICE],
    },
];

static CREATIVE: &[CannedScenario] = &[
    CannedScenario {
        title: "The Fifth Revision",
        context: "A client has asked for a fifth round of revisions on a logo. Each round reverses the feedback from the one before.",
        challenge: "The budget covered two rounds and your studio has other deadlines.",
        options: &[
            CannedOption { id: "a", text: "Call the client to uncover what they really want", skills: &["client communication", "active listening"], traits: &["empathetic"] },
            CannedOption { id: "b", text: "Present a revised scope and cost for further rounds", skills: &["negotiation", "business sense"], traits: &["assertive"] },
            CannedOption { id: "c", text: "Run a short workshop with their decision-makers", skills: &["facilitation", "creative direction"], traits: &["collaborative"] },
            CannedOption { id: "d", text: "Deliver the revision and absorb the extra time", skills: &["adaptability"], traits: &["accommodating"] },
        ],
        follow_up: &["How would you set up the next project to avoid this?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Borrowed Idea",
        context: "At a team review you see that a colleague's campaign concept closely resembles an idea you pitched privately to them last month.",
        challenge: "The concept is about to be presented to the client under their name.",
        options: &[
            CannedOption { id: "a", text: "Talk to the colleague privately before the presentation", skills: &["conflict resolution", "communication"], traits: &["direct", "diplomatic"] },
            CannedOption { id: "b", text: "Raise it with the creative director with your notes", skills: &["documentation", "escalation judgement"], traits: &["principled"] },
            CannedOption { id: "c", text: "Let it go and focus on your next idea", skills: &["resilience"], traits: &["easy-going"] },
            CannedOption { id: "d", text: "Offer to co-present and build on the concept together", skills: &["collaboration", "creativity"], traits: &["generous"] },
        ],
        follow_up: &["How do you protect your ideas without slowing collaboration?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "Launch Day Typo",
        context: "Hours after a product video goes live you spot a typo in the on-screen pricing. Thousands of people have already watched it.",
        challenge: "The marketing lead is travelling and cannot be reached for three hours.",
        options: &[
            CannedOption { id: "a", text: "Take the video down, fix it and re-upload", skills: &["ownership", "attention to detail"], traits: &["decisive"] },
            CannedOption { id: "b", text: "Pin a correction comment and fix it when the lead is back", skills: &["damage control"], traits: &["cautious"] },
            CannedOption { id: "c", text: "Alert support and legal in case customers complain", skills: &["cross-functional communication"], traits: &["thorough"] },
            CannedOption { id: "d", text: "Fix the video and send the lead a summary of what you did", skills: &["initiative", "written communication"], traits: &["proactive"] },
        ],
        follow_up: &["What review step would have caught the mistake?", REFLECT_ON_CHOICE],
    },
];

static EDUCATION: &[CannedScenario] = &[
    CannedScenario {
        title: "The Back Row",
        context: "A usually strong student has started disrupting lessons and missed two assignments in a row.",
        challenge: "Today they walked out of class after a minor comment from a classmate.",
        options: &[
            CannedOption { id: "a", text: "Find a quiet moment to ask how they are doing", skills: &["empathy", "active listening"], traits: &["supportive"] },
            CannedOption { id: "b", text: "Follow the school's behaviour policy consistently", skills: &["classroom management"], traits: &["principled", "structured"] },
            CannedOption { id: "c", text: "Contact the parents and the school counsellor", skills: &["stakeholder communication"], traits: &["thorough"] },
            CannedOption { id: "d", text: "Adjust your lessons to re-engage them", skills: &["adaptability", "creativity"], traits: &["flexible"] },
        ],
        follow_up: &["How would you involve the rest of the class, if at all?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "The Grade Appeal",
        context: "A parent emails the principal claiming you graded their child's essay unfairly. The email is copied to three other parents.",
        challenge: "The principal asks you to respond before the end of the day.",
        options: &[
            CannedOption { id: "a", text: "Offer a meeting and walk through the rubric", skills: &["communication", "transparency"], traits: &["diplomatic"] },
            CannedOption { id: "b", text: "Ask a colleague to blind-mark the essay", skills: &["fairness", "collaboration"], traits: &["principled"] },
            CannedOption { id: "c", text: "Reply in writing with detailed feedback on the essay", skills: &["written communication"], traits: &["methodical"] },
            CannedOption { id: "d", text: "Let the principal handle the parent directly", skills: &["escalation judgement"], traits: &["cautious"] },
        ],
        follow_up: &["How would you address the other parents who were copied?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "New Curriculum, Old Timetable",
        context: "The department adopts a new curriculum mid-year. Materials arrive late and colleagues are anxious.",
        challenge: "You are asked to help the department make the switch within a month.",
        options: &[
            CannedOption { id: "a", text: "Build shared lesson plans the whole department can use", skills: &["curriculum design", "collaboration"], traits: &["generous", "organized"] },
            CannedOption { id: "b", text: "Run short training sessions for colleagues", skills: &["teaching", "leadership"], traits: &["confident"] },
            CannedOption { id: "c", text: "Pilot the new curriculum in one class first", skills: &["experimentation", "planning"], traits: &["cautious", "analytical"] },
            CannedOption { id: "d", text: "Ask leadership for more time and resources", skills: &["advocacy"], traits: &["assertive"] },
        ],
        follow_up: &["How would you know the switch worked for students?", REFLECT_ON_CHOICE],
    },
];

static GENERAL: &[CannedScenario] = &[
    CannedScenario {
        title: "The Impossible Deadline",
        context: "Your manager promises a customer a deliverable in one week. Your team estimated three.",
        challenge: "The team looks to you to respond in the next planning meeting.",
        options: &[
            CannedOption { id: "a", text: "Propose a reduced scope that fits the week", skills: &["negotiation", "prioritization"], traits: &["pragmatic"] },
            CannedOption { id: "b", text: "Show the estimate and explain the risks to the manager", skills: &["communication", "risk management"], traits: &["honest"] },
            CannedOption { id: "c", text: "Rally the team to attempt it with extra hours", skills: &["motivation"], traits: &["driven"] },
            CannedOption { id: "d", text: "Suggest the manager renegotiate with the customer", skills: &["stakeholder management"], traits: &["assertive"] },
        ],
        follow_up: &["How would you prevent this from happening again?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "Your Own Mistake",
        context: "You discover an error in a report you submitted last week. Decisions have already been made using it.",
        challenge: "Nobody else has noticed the error yet.",
        options: &[
            CannedOption { id: "a", text: "Tell your manager straight away with a corrected version", skills: &["accountability", "communication"], traits: &["honest"] },
            CannedOption { id: "b", text: "Work out the impact of the error before raising it", skills: &["analysis"], traits: &["methodical"] },
            CannedOption { id: "c", text: "Correct it quietly in the next version", skills: &["discretion"], traits: &["cautious"] },
            CannedOption { id: "d", text: "Email everyone who received it with the correction", skills: &["transparency", "written communication"], traits: &["principled"] },
        ],
        follow_up: &["What check would you add to your process?", REFLECT_ON_CHOICE],
    },
    CannedScenario {
        title: "Friction in the Team",
        context: "Two colleagues have stopped speaking to each other after a heated meeting. Work that needs both of them is stalling.",
        challenge: "Neither of them reports to you, but the delay affects your project.",
        options: &[
            CannedOption { id: "a", text: "Speak to each of them separately to understand the issue", skills: &["conflict resolution", "active listening"], traits: &["empathetic"] },
            CannedOption { id: "b", text: "Bring them together with a clear agenda about the work", skills: &["facilitation"], traits: &["direct"] },
            CannedOption { id: "c", text: "Raise the delay with their manager", skills: &["escalation judgement"], traits: &["cautious"] },
            CannedOption { id: "d", text: "Restructure the work so they can proceed independently", skills: &["problem solving", "planning"], traits: &["pragmatic"] },
        ],
        follow_up: &["When is it your place to step into a conflict?", REFLECT_ON_CHOICE],
    },
];

/// The catalog for a canonical field key; unknown keys get the general catalog.
pub fn catalog_for(field_key: &str) -> &'static [CannedScenario] {
    match field_key {
        "technology" => TECHNOLOGY,
        "healthcare" => HEALTHCARE,
        "business" => BUSINESS,
        "creative" => CREATIVE,
        "education" => EDUCATION,
        _ => GENERAL,
    }
}
