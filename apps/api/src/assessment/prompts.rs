// All LLM prompt constants for the assessment stages.
// Each template is filled by `prompt_builder` with `str::replace`; the shared
// JSON-only and audience fragments come from llm_client::prompts.

/// Preamble for question-writing stages.
pub const QUESTION_DESIGNER_ROLE: &str = "You are an expert career counsellor and \
    psychometric assessment designer. You write clear, unambiguous questions that reveal \
    how strong a person really is at a skill, not just how they rate themselves.";

/// Preamble for stages that judge a person's answers.
pub const CAREER_ANALYST_ROLE: &str = "You are a senior career analyst who turns assessment \
    answers into honest, evidence-based conclusions about strengths, gaps and fit.";

/// Preamble for workplace scenario writing.
pub const SCENARIO_WRITER_ROLE: &str = "You are an industrial-organizational psychologist who \
    writes realistic workplace situations. Every option must be a plausible thing a competent \
    professional might do; there is no obviously wrong answer.";

/// Preamble for labour-market stages.
pub const MARKET_RESEARCHER_ROLE: &str = "You are a labour-market researcher and career coach \
    with current knowledge of hiring demand, salaries and training options.";

/// Initial question generation.
/// Replace: {role}, {audience}, {count}, {skills}, {per_skill}, {avoid}, {json_instruction}
pub const INITIAL_QUESTIONS_TEMPLATE: &str = r#"{role}

{audience}

Create {count} assessment questions that measure these skills: {skills}.
Write {per_skill} questions per skill. Mix the question types "multiple-choice", "scale" and "scenario".
Scale questions ask for a 1-5 rating and list the five labels as options.
Every question must name the skill(s) it measures in "skillsAssessed", using the skill names exactly as given.
Difficulty runs from 1 (introductory) to 3 for this first round.

Do NOT repeat or paraphrase any of these earlier questions:
{avoid}

{json_instruction}

{
  "questions": [
    {
      "id": "q1",
      "question": "A teammate misunderstood your instructions and delivered the wrong report. What do you do first?",
      "type": "multiple-choice",
      "options": [
        "Walk through the instructions together and agree on next steps",
        "Fix the report yourself to save time",
        "Send a written summary of what was expected",
        "Escalate to your manager"
      ],
      "skillsAssessed": ["communication"],
      "difficulty": 2,
      "scenario": null
    }
  ]
}"#;

/// Skill ranking from first-round answers.
/// Replace: {role}, {skills}, {responses_json}, {json_instruction}
pub const SKILL_RANKING_TEMPLATE: &str = r#"{role}

The person was assessed on these skills: {skills}.
Their answers (question, answer, optional reasoning and the skills each question targets):
{responses_json}

Pick the TWO skills where the answers show the strongest ability and the most confidence.
Judge the substance of the answers, not only self-ratings.
Use the skill names exactly as listed above and order them strongest first.

{json_instruction}

{
  "topSkills": ["communication", "leadership"],
  "reasoning": "Consistently chose collaborative options and rated themselves highly on conflict questions."
}"#;

/// Advanced questions for one top skill.
/// Replace: {role}, {skill}, {count}, {prior_json}, {avoid}, {json_instruction}
pub const DEEP_DIVE_TEMPLATE: &str = r#"{role}

The person showed strength in "{skill}". Write {count} ADVANCED questions that separate
competent practitioners from experts in this skill. Use "scenario", "multiple-choice" and "ranking"
types; ranking questions list 4 items to put in order. Difficulty must be 3, 4 or 5.
Every question lists "{skill}" in "skillsAssessed".

Earlier answers from this person, for calibration:
{prior_json}

Do NOT repeat or paraphrase any of these earlier questions:
{avoid}

{json_instruction}

{
  "questions": [
    {
      "id": "dd1",
      "question": "Two senior stakeholders give you contradictory priorities for the same deadline. How do you resolve it?",
      "type": "scenario",
      "options": [
        "Bring both together to agree on a single priority",
        "Follow the more senior stakeholder",
        "Split the team across both priorities",
        "Ask your manager to decide"
      ],
      "skillsAssessed": ["{skill}"],
      "difficulty": 4,
      "scenario": "You lead a five-person team two weeks before a product launch."
    }
  ]
}"#;

/// One workplace scenario.
/// Replace: {role}, {field}, {niche_line}, {vocabulary}, {stakeholders}, {focus}, {avoid}, {json_instruction}
pub const SCENARIO_TEMPLATE: &str = r#"{role}

Write ONE realistic workplace scenario for someone working in {field}.
{niche_line}
Use the vocabulary of the domain where natural: {vocabulary}.
People who may appear in the scenario: {stakeholders}.
The scenario's central challenge should be about: {focus}.

Give 4 response options. Each option lists the skills it demonstrates and the personality traits it reveals.
Add 2 short follow-up questions that ask the person to reflect on their choice.

The title must be new. Do NOT reuse or closely paraphrase any of these titles:
{avoid}

{json_instruction}

{
  "title": "The Midnight Deployment",
  "context": "Your team shipped a release at 6pm. At 11pm monitoring shows checkout errors rising for 5% of users.",
  "challenge": "The on-call engineer is unreachable and the product lead wants a decision in ten minutes.",
  "options": [
    {"id": "a", "text": "Roll back immediately and investigate tomorrow", "skills": ["risk management", "decision making"], "traits": ["cautious", "decisive"]},
    {"id": "b", "text": "Hot-fix the failing path yourself", "skills": ["technical depth"], "traits": ["independent", "bold"]},
    {"id": "c", "text": "Page the wider team and coordinate a response", "skills": ["coordination", "communication"], "traits": ["collaborative"]},
    {"id": "d", "text": "Keep the release, add a banner and monitor", "skills": ["prioritization"], "traits": ["pragmatic"]}
  ],
  "followUpQuestions": [
    "What information would have changed your decision?",
    "How would you explain your choice to the product lead the next morning?"
  ]
}"#;

/// Personality and career read-out from scenario choices.
/// Replace: {role}, {field}, {domain_context}, {choices_json}, {json_instruction}
pub const SCENARIO_ANALYSIS_TEMPLATE: &str = r#"{role}

The person answered workplace scenarios set in {field}.
Domain context: {domain_context}

Their choices (scenario title, chosen option with its skills and traits, optional reasoning):
{choices_json}

Infer their dominant personality traits (score each 0-100), their overall work style,
the skills their choices demonstrate and 3 career directions in {field} that suit them.

{json_instruction}

{
  "dominantTraits": [
    {
      "trait": "Collaborative",
      "score": 82,
      "description": "Prefers to bring people together before acting.",
      "careerImplications": ["Thrives in cross-functional roles", "May find solo research roles isolating"]
    }
  ],
  "workStyle": "Consensus-driven and steady under pressure",
  "demonstratedSkills": ["communication", "coordination"],
  "careerSuggestions": ["Engineering Manager", "Technical Program Manager", "Scrum Master"],
  "summary": "Choices consistently favoured coordinated team responses over individual heroics."
}"#;

/// Dossier on one top skill.
/// Replace: {role}, {skill}, {profile_line}, {evidence_json}, {json_instruction}
pub const SKILL_DETAIL_TEMPLATE: &str = r#"{role}

Write a detailed dossier on the skill "{skill}" for this person: {profile_line}.
Evidence from their assessment answers:
{evidence_json}

Cover current market demand, which industries hire for it (percentages sum to roughly 100),
a short narrative on how this person can build on it, 3-5 learning resources and a 4-step career progression.

{json_instruction}

{
  "skill": "{skill}",
  "marketDemand": {"level": "High", "growthRate": "+12% over 5 years", "averageSalary": "$85,000 - $120,000"},
  "industryBreakdown": [
    {"industry": "Technology", "percentage": 40},
    {"industry": "Finance", "percentage": 25},
    {"industry": "Healthcare", "percentage": 20},
    {"industry": "Other", "percentage": 15}
  ],
  "narrative": "Your answers show ...",
  "learningResources": [
    {"title": "Crucial Conversations", "kind": "book", "provider": "McGraw Hill", "duration": "2 weeks"}
  ],
  "careerProgression": [
    {"level": "Entry", "title": "Coordinator", "yearsExperience": "0-2", "salaryRange": "$45,000 - $60,000"}
  ]
}"#;

/// Core career-fit analysis.
/// Replace: {role}, {top_skills}, {profile_line}, {domain_context}, {responses_json}, {json_instruction}
pub const CAREER_FIT_TEMPLATE: &str = r#"{role}

Top skills identified by the assessment: {top_skills}.
About the person: {profile_line}.
Domain context: {domain_context}

Their assessment answers:
{responses_json}

Produce an overall score (0-100) for how ready they are for their next career step,
their top strengths, their most important skill gaps (levels 0-100, priority "high", "medium" or "low"),
4 career recommendations with realistic salary ranges, and current market insights.

{json_instruction}

{
  "overallScore": 74,
  "topStrengths": ["Clear written communication", "Calm under pressure"],
  "skillGaps": [
    {"skill": "data analysis", "currentLevel": 35, "requiredLevel": 70, "priority": "high", "developmentTime": "3-6 months"}
  ],
  "careerRecommendations": [
    {
      "title": "Product Manager",
      "field": "Technology",
      "matchScore": 86,
      "salaryRange": "$95,000 - $140,000",
      "growthOutlook": "Strong",
      "requiredSkills": ["communication", "prioritization", "data analysis"],
      "transitionTime": "6-12 months"
    }
  ],
  "marketInsights": {
    "demandLevel": "High",
    "competitionLevel": "Moderate",
    "trendingSkills": ["AI literacy", "stakeholder management"]
  }
}"#;

/// Learning path for the career-fit fan-out.
/// Replace: {role}, {top_skills}, {profile_line}, {json_instruction}
pub const LEARNING_PATH_TEMPLATE: &str = r#"{role}

Design a learning path that deepens these skills: {top_skills}.
About the person: {profile_line}.
Give 4-6 steps ordered from first to last. Prefer well-known, reputable resources.

{json_instruction}

{
  "learningPath": [
    {"skill": "leadership", "resource": "Coursera: Inspiring and Motivating Individuals", "format": "online course", "duration": "4 weeks"}
  ]
}"#;

/// Personality profile for the career-fit fan-out.
/// Replace: {role}, {top_skills}, {responses_json}, {json_instruction}
pub const PERSONALITY_TEMPLATE: &str = r#"{role}

From these assessment answers, describe 4-5 work-relevant personality traits.
The person's strongest skills are {top_skills}.
{responses_json}

Score each trait 0-100 and explain what it means for their career.

{json_instruction}

{
  "personalityTraits": [
    {
      "trait": "Analytical",
      "score": 78,
      "description": "Breaks problems into parts before acting.",
      "careerImplications": ["Suited to roles with complex trade-offs"]
    }
  ]
}"#;

/// Phased roadmap for the career-fit fan-out.
/// Replace: {role}, {top_skills}, {profile_line}, {json_instruction}
pub const ROADMAP_TEMPLATE: &str = r#"{role}

Build a phased 12-month career development roadmap for someone whose strongest skills are {top_skills}.
About the person: {profile_line}.
Use 3-4 phases with concrete goals and measurable milestones.

{json_instruction}

{
  "roadmap": [
    {
      "phase": "Foundation",
      "duration": "Months 1-3",
      "goals": ["Close the biggest skill gap"],
      "milestones": ["Complete one certification", "Ship one portfolio project"]
    }
  ]
}"#;
