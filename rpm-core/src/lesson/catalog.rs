//! Closed choice sets offered by the form.
//!
//! Every enum serialises as its Indonesian display label so the browser can
//! post back exactly what it rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subjects taught at the madrasah
pub const SUBJECTS: &[&str] = &[
    "Al-Qur'an Hadis (Qurdits)",
    "Akidah Akhlak",
    "Fikih",
    "Sejarah Kebudayaan Islam (SKI)",
    "Bahasa Arab",
    "Bahasa Indonesia",
    "Matematika",
    "Ilmu Pengetahuan Alam (IPA)",
    "Ilmu Pengetahuan Sosial (IPS)",
    "Pendidikan Pancasila dan Kewarganegaraan (PPKn)",
    "Bahasa Inggris",
    "Seni Budaya dan Prakarya",
    "Pendidikan Jasmani, Olahraga, dan Kesehatan (PJOK)",
    "Teknologi Informasi dan Komunikasi (TIK)",
    "Bahasa Jawa",
    "Aswaja",
    "Mabadi' Fiqhiyah",
];

pub fn is_known_subject(subject: &str) -> bool {
    SUBJECTS.contains(&subject.trim())
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in catalog order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Teaching model used in one meeting
    PedagogicalPractice {
        Contextual => "Contextual Teaching and Learning (CTL)",
        Cooperative => "Cooperative Learning",
        Differentiated => "Differentiated Instruction",
        Flipped => "Flipped Classroom",
        GameBased => "Game Based Learning",
        InquiryDiscovery => "Inkuiri-Discovery",
        ProjectBased => "PjBL",
        ProblemBased => "Problem Based Learning (PBL)",
        ProblemSolving => "Problem Solving",
        StationLearning => "Station Learning",
    }
}

labelled_enum! {
    /// Graduate-profile dimension targeted by the plan
    GraduateDimension {
        Faith => "Keimanan & Ketakwaan",
        Citizenship => "Kewargaan",
        CriticalReasoning => "Penalaran Kritis",
        Creativity => "Kreativitas",
        Collaboration => "Kolaborasi",
        Independence => "Kemandirian",
        Health => "Kesehatan",
        Communication => "Komunikasi",
    }
}

labelled_enum! {
    /// Extra compliance content injected into the prompt
    IntegrationOption {
        None => "Tidak Ada",
        ChildFriendlySchool => "Insersi Nilai SRA (Sekolah Ramah Anak)",
        LiteracyNumeracy => "Integrasi Literasi/Numerasi (TKA)",
    }
}

labelled_enum! {
    /// Language of the opening and closing greetings
    GreetingLanguage {
        None => "Tidak Ada",
        Arabic => "Bahasa Arab",
        English => "Bahasa Inggris",
    }
}

labelled_enum! {
    ClassLevel {
        Seventh => "VII",
        Eighth => "VIII",
        Ninth => "IX",
    }
}

labelled_enum! {
    Semester {
        First => "I",
        Second => "II",
        Third => "III",
        Fourth => "IV",
        Fifth => "V",
        Sixth => "VI",
    }
}

impl Default for PedagogicalPractice {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl Default for IntegrationOption {
    fn default() -> Self {
        Self::None
    }
}

impl Default for GreetingLanguage {
    fn default() -> Self {
        Self::None
    }
}

impl Default for ClassLevel {
    fn default() -> Self {
        Self::Seventh
    }
}

impl Default for Semester {
    fn default() -> Self {
        Self::First
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_verbatim() {
        let json = serde_json::to_string(&PedagogicalPractice::ProjectBased).unwrap();
        assert_eq!(json, "\"PjBL\"");

        let parsed: IntegrationOption =
            serde_json::from_str("\"Integrasi Literasi/Numerasi (TKA)\"").unwrap();
        assert_eq!(parsed, IntegrationOption::LiteracyNumeracy);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(serde_json::from_str::<GreetingLanguage>("\"Bahasa Jepang\"").is_err());
    }

    #[test]
    fn default_practice_is_first_in_catalog() {
        assert_eq!(PedagogicalPractice::default(), PedagogicalPractice::Contextual);
        assert_eq!(PedagogicalPractice::ALL.len(), 10);
        assert_eq!(GraduateDimension::ALL.len(), 8);
    }

    #[test]
    fn subject_catalog_lookup_ignores_surrounding_whitespace() {
        assert!(is_known_subject(" Fikih "));
        assert!(!is_known_subject("Astronomi"));
        assert_eq!(SUBJECTS.len(), 17);
    }
}
