//! Built-in career knowledge table.
//!
//! A small, hand-curated set of Indian career paths grouped as Technology,
//! Medical, Business, and Arts. Serialized into every system instruction.

use edgo_types::career::{CareerCategory, CareerDatabase, CareerRecord};

struct Seed {
    role: &'static str,
    keywords: &'static [&'static str],
    exams: &'static str,
    degrees: &'static str,
    colleges: &'static str,
    salary: &'static str,
    description: &'static str,
}

const TECHNOLOGY: &[Seed] = &[
    Seed {
        role: "Software Engineer",
        keywords: &["coding", "problem solving", "computers", "logic"],
        exams: "JEE Main, JEE Advanced, BITSAT, VITEEE",
        degrees: "B.Tech/B.E in CSE/IT",
        colleges: "IITs, NITs, IIITs, BITS Pilani, DTU",
        salary: "8-25 LPA (Fresher) to 40+ LPA (Experienced)",
        description: "Design and build software applications. Requires strong logic and coding skills.",
    },
    Seed {
        role: "Data Scientist",
        keywords: &["math", "statistics", "patterns", "analysis"],
        exams: "GATE (for Masters), ISI Admission Test",
        degrees: "B.Tech CSE, B.Stat, B.Sc Math/Stats",
        colleges: "ISI Kolkata, IITs, IISc Bangalore",
        salary: "10-20 LPA (Fresher)",
        description: "Analyze complex data to help organizations make decisions. High demand in AI/ML sectors.",
    },
];

const MEDICAL: &[Seed] = &[Seed {
    role: "Doctor (MBBS)",
    keywords: &["biology", "helping people", "health", "anatomy"],
    exams: "NEET-UG, NEET-PG (Specialization)",
    degrees: "MBBS",
    colleges: "AIIMS, CMC Vellore, JIPMER, KGMU",
    salary: "6-12 LPA (Intern/Junior) to 25+ LPA (Specialist)",
    description: "Diagnose and treat illnesses. Requires long dedication and intense study.",
}];

const BUSINESS: &[Seed] = &[
    Seed {
        role: "Chartered Accountant (CA)",
        keywords: &["finance", "accounting", "numbers", "tax", "audit"],
        exams: "CA Foundation, CA Intermediate, CA Final",
        degrees: "B.Com (often pursued alongside)",
        colleges: "ICAI (Institute)",
        salary: "7-12 LPA (Fresher)",
        description: "Expert in accounting, auditing, and taxation. highly respected and financially stable.",
    },
    Seed {
        role: "Management Consultant",
        keywords: &["business", "strategy", "leadership", "solving problems"],
        exams: "CAT, GMAT (for MBA)",
        degrees: "BBA/B.Tech -> MBA",
        colleges: "IIMs (A, B, C), ISB, FMS Delhi",
        salary: "20-35 LPA (Post-MBA)",
        description: "Advise companies on how to improve performance and grow.",
    },
];

const ARTS: &[Seed] = &[
    Seed {
        role: "Corporate Lawyer",
        keywords: &["law", "argument", "reading", "justice", "politics"],
        exams: "CLAT, AILET",
        degrees: "BA LLB (5-year integrated)",
        colleges: "NLSIU Bangalore, NALSAR Hyderabad, NLU Delhi",
        salary: "12-18 LPA (Top Law Firms)",
        description: "Handle legal matters for corporations. High pressure, high reward.",
    },
    Seed {
        role: "Product Designer (UX/UI)",
        keywords: &["art", "creativity", "sketching", "technology"],
        exams: "UCEED, NID DAT",
        degrees: "B.Des",
        colleges: "NID, IDC IIT Bombay, NIFT",
        salary: "6-15 LPA",
        description: "Design digital or physical products focusing on user experience.",
    },
];

impl Seed {
    fn to_record(&self) -> CareerRecord {
        CareerRecord {
            role: self.role.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            exams: self.exams.to_string(),
            degrees: self.degrees.to_string(),
            colleges: self.colleges.to_string(),
            salary: self.salary.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// The career table shipped with the binary.
pub fn builtin_database() -> CareerDatabase {
    let categories = [
        ("Technology", TECHNOLOGY),
        ("Medical", MEDICAL),
        ("Business", BUSINESS),
        ("Arts", ARTS),
    ]
    .into_iter()
    .map(|(name, seeds)| CareerCategory {
        name: name.to_string(),
        careers: seeds.iter().map(Seed::to_record).collect(),
    })
    .collect();

    CareerDatabase { categories }
}
