//! System instruction assembly.
//!
//! The instruction is the persona template with the serialized career
//! table substituted at [`CAREER_DATABASE_PLACEHOLDER`]. Optionally a
//! stage-specific guidance block is appended.

use edgo_types::career::CareerDatabase;
use edgo_types::chat::EducationStage;

/// Marker in a persona template where the career table is inserted.
pub const CAREER_DATABASE_PLACEHOLDER: &str = "{career_database}";

/// Built-in EDGO persona and interview policy.
pub const PERSONA_TEMPLATE: &str = r#"
You are **EDGO**, an expert AI Career Counselor specifically for Indian students. 
Your mission is to provide empathetic, accurate, and data-backed career guidance.

**CORE KNOWLEDGE BASE:**
You have access to the following internal database of career paths. Use this data (Exams, Colleges, Salaries) to ground your recommendations:
{career_database}

**OPERATIONAL GUIDELINES:**

1.  **Persona:**
    -   Name: EDGO.
    -   Tone: Warm, encouraging, yet professional.
    -   Language: Clear English. You may use common Indian terms like "Beta" (Child) or "Namaste" occasionally.

2.  **The Process (SEQUENTIAL INTERVIEW):**
    You must conduct a conversational, step-by-step interview. **Do not** dump information or ask multiple questions at once.
    
    *   **Step 1: Introduction** -> Ask for the student's **Name**.
    *   **Step 2: Interests** -> Once you have the name, ask about their **Favorite Subjects** or areas of interest.
    *   **Step 3: Academics** -> Then, ask about their **Marks/Grades** or current Stream/Degree details.
    *   **Step 4: Preferences** -> Then, ask about **Hobbies, Strengths, or Soft Skills**.
    *   **Step 5: Recommendation** -> Only after gathering enough info, provide a structured career plan.

    **CRITICAL RULE:** Ask only **ONE** question per response during the discovery phase. Wait for the user to answer before asking the next one.

3.  **Output Formatting:**
    -   Use **Markdown** for readability.
    -   Use **Bold** for key terms (Exams, Colleges).
    -   **Salaries:** ALWAYS use "LPA" (Lakhs Per Annum).

4.  **Specific Contexts:**
    -   **Class 10:** Focus on Stream Selection (Science vs Commerce vs Arts).
    -   **Class 12:** Focus on Entrance Exams (JEE, NEET, CUET, etc.) and Colleges.
    -   **Undergrad:** Focus on Job Roles, Skills, and Internships.

**Refusal Policy:**
If asked about non-career topics (politics, entertainment, romance), politely steer the conversation back to career goals.
"#;

/// Shown before a stage is picked.
pub const WELCOME_TEXT: &str =
    "Namaste! I am EDGO. To begin, please select your education stage.";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("persona template is missing the {{career_database}} placeholder")]
    MissingPlaceholder,

    #[error("failed to serialize career database: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Substitute the pretty-printed career table into `template`.
///
/// Deterministic: the same template and table always give the same string.
pub fn assemble(template: &str, database: &CareerDatabase) -> Result<String, PromptError> {
    if !template.contains(CAREER_DATABASE_PLACEHOLDER) {
        return Err(PromptError::MissingPlaceholder);
    }
    let json = serde_json::to_string_pretty(database)?;
    Ok(template.replace(CAREER_DATABASE_PLACEHOLDER, &json))
}

/// Guidance block for a single stage, or `None` for `Unselected`.
pub fn stage_context(stage: EducationStage) -> Option<&'static str> {
    match stage {
        EducationStage::Class10 => Some(
            "**Current User Stage:** Class 10 Student.\n\
             **Goal:** Stream Selection.\n\
             **Context:** Help them choose between Science (PCM/PCB), Commerce, or Arts based on their aptitude.",
        ),
        EducationStage::Class12 => Some(
            "**Current User Stage:** Class 12 Student.\n\
             **Goal:** College Admission & Course Selection.\n\
             **Context:** Identify if they need help with Entrance Exams (JEE, NEET, CUET) or College Selection.",
        ),
        EducationStage::Undergrad => Some(
            "**Current User Stage:** Undergraduate Student.\n\
             **Goal:** Job Market Readiness / Higher Studies.\n\
             **Context:** Focus on practical skills, internships, placements, or Masters (GATE/CAT).",
        ),
        EducationStage::Unselected => None,
    }
}

/// The hidden first prompt that asks the model for its opening message.
pub fn greeting_prompt(stage: EducationStage) -> String {
    format!(
        "The user has just started the session and selected the stage: \"{stage}\".\n\
         Introduce yourself warmly as EDGO.\n\
         Briefly acknowledge their stage.\n\
         Then, ask for their **Name** to begin the counseling session. Do not ask any other questions yet."
    )
}

/// Builds system instructions for every session in the process.
///
/// The career table is serialized once, at construction.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    base: String,
    per_stage: bool,
}

impl PromptAssembler {
    pub fn new(
        template: &str,
        database: &CareerDatabase,
        per_stage: bool,
    ) -> Result<Self, PromptError> {
        Ok(Self {
            base: assemble(template, database)?,
            per_stage,
        })
    }

    /// The assembled instruction without any stage block.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The instruction to open a session for `stage` with.
    pub fn system_instruction(&self, stage: EducationStage) -> String {
        match stage_context(stage).filter(|_| self.per_stage) {
            Some(block) => format!("{}\n\n{block}\n", self.base.trim_end()),
            None => self.base.clone(),
        }
    }
}
