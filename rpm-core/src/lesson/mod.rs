//! Lesson-plan input model
//!
//! [`LessonPlanRequest`] is everything the teacher enters in the form. It is
//! mutated while the form is being edited and submitted as an immutable
//! snapshot; nothing here is persisted.

pub mod catalog;
pub mod validation;

pub use catalog::{
    ClassLevel, GraduateDimension, GreetingLanguage, IntegrationOption, PedagogicalPractice,
    SUBJECTS, Semester, is_known_subject,
};
pub use validation::{Field, FieldError, ValidationErrors};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanRequest {
    pub teacher_name: String,
    pub teacher_nip: String,
    pub class_name: ClassLevel,
    pub semester: Semester,
    pub subject: String,
    pub learning_objectives: String,
    pub subject_matter: String,
    pub language: GreetingLanguage,
    /// Signed so out-of-range form input reaches validation intact
    pub meetings: i32,
    /// One entry per meeting, in meeting order
    pub pedagogical_practices: Vec<PedagogicalPractice>,
    pub graduate_dimensions: Vec<GraduateDimension>,
    #[serde(default)]
    pub integration_option: IntegrationOption,
}

impl Default for LessonPlanRequest {
    fn default() -> Self {
        Self {
            teacher_name: String::new(),
            teacher_nip: String::new(),
            class_name: ClassLevel::default(),
            semester: Semester::default(),
            subject: SUBJECTS[0].to_string(),
            learning_objectives: String::new(),
            subject_matter: String::new(),
            language: GreetingLanguage::None,
            meetings: 1,
            pedagogical_practices: vec![PedagogicalPractice::default()],
            graduate_dimensions: Vec::new(),
            integration_option: IntegrationOption::None,
        }
    }
}

impl LessonPlanRequest {
    /// Filled-in sample offered by the "Isi Contoh" button
    pub fn example() -> Self {
        Self {
            teacher_name: "Siti Aminah, S.Ag.".to_string(),
            teacher_nip: "198805202012012002".to_string(),
            class_name: ClassLevel::Ninth,
            semester: Semester::Fifth,
            subject: "Al-Qur'an Hadis (Qurdits)".to_string(),
            learning_objectives: "Siswa mampu menganalisis kandungan Q.S. al-An'am: 162-163 dan \
                Hadis riwayat Bukhari Muslim tentang ikhlas dalam beribadah, serta mengaitkannya \
                dengan perilaku dalam kehidupan sehari-hari."
                .to_string(),
            subject_matter:
                "Ikhlas dalam Beribadah (Studi Q.S. al-An'am: 162-163 dan Hadis Terkait)"
                    .to_string(),
            language: GreetingLanguage::Arabic,
            meetings: 2,
            pedagogical_practices: vec![
                PedagogicalPractice::Contextual,
                PedagogicalPractice::Cooperative,
            ],
            graduate_dimensions: vec![
                GraduateDimension::Faith,
                GraduateDimension::CriticalReasoning,
                GraduateDimension::Independence,
            ],
            integration_option: IntegrationOption::ChildFriendlySchool,
        }
    }

    /// Change the meeting count, keeping one practice per meeting.
    ///
    /// Shrinking truncates; growing pads with the default practice. A count
    /// below one leaves no practices.
    pub fn set_meetings(&mut self, meetings: i32) {
        self.meetings = meetings;
        let slots = usize::try_from(meetings).unwrap_or(0);
        self.pedagogical_practices
            .resize(slots, PedagogicalPractice::default());
    }

    /// Replace the practice of one meeting; out-of-range indices are ignored
    pub fn set_practice(&mut self, index: usize, practice: PedagogicalPractice) {
        if let Some(slot) = self.pedagogical_practices.get_mut(index) {
            *slot = practice;
        }
    }

    /// Select or deselect a graduate dimension
    pub fn toggle_dimension(&mut self, dimension: GraduateDimension) {
        if let Some(pos) = self
            .graduate_dimensions
            .iter()
            .position(|selected| *selected == dimension)
        {
            self.graduate_dimensions.remove(pos);
        } else {
            self.graduate_dimensions.push(dimension);
        }
    }

    /// Check every submission guard, collecting one error per failing field
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.teacher_name.trim().is_empty() {
            errors.push(Field::TeacherName, "Nama Guru wajib diisi.");
        }
        if self.teacher_nip.trim().is_empty() {
            errors.push(Field::TeacherNip, "NIP Guru wajib diisi.");
        }
        if self.subject.trim().is_empty() {
            errors.push(Field::Subject, "Mata Pelajaran wajib diisi.");
        } else if !is_known_subject(&self.subject) {
            errors.push(Field::Subject, "Mata Pelajaran tidak terdapat dalam daftar.");
        }
        if self.learning_objectives.trim().is_empty() {
            errors.push(Field::LearningObjectives, "Tujuan Pembelajaran wajib diisi.");
        }
        if self.subject_matter.trim().is_empty() {
            errors.push(Field::SubjectMatter, "Materi Pelajaran wajib diisi.");
        }
        if self.meetings < 1 {
            errors.push(Field::Meetings, "Jumlah Pertemuan minimal 1.");
        } else if usize::try_from(self.meetings).ok() != Some(self.pedagogical_practices.len()) {
            errors.push(
                Field::PedagogicalPractices,
                "Pilih satu Praktik Pedagogis untuk setiap pertemuan.",
            );
        }
        if self.graduate_dimensions.is_empty() {
            errors.push(
                Field::GraduateDimensions,
                "Pilih minimal satu Dimensi Lulusan.",
            );
        }

        errors.into_result()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// "Pertemuan 1: X, Pertemuan 2: Y" summary used throughout the prompt
    pub fn practices_summary(&self) -> String {
        self.pedagogical_practices
            .iter()
            .enumerate()
            .map(|(index, practice)| format!("Pertemuan {}: {}", index + 1, practice))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn dimensions_summary(&self) -> String {
        self.graduate_dimensions
            .iter()
            .map(|dimension| dimension.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> LessonPlanRequest {
        LessonPlanRequest::example()
    }

    #[test]
    fn example_request_is_valid() {
        assert!(valid_request().is_valid());
    }

    #[test]
    fn default_form_keeps_one_practice_per_meeting() {
        let request = LessonPlanRequest::default();
        assert_eq!(request.meetings, 1);
        assert_eq!(request.pedagogical_practices.len(), 1);
        assert!(!request.is_valid());
    }

    #[test]
    fn growing_meetings_pads_with_default_practice() {
        let mut request = valid_request();
        request.set_meetings(4);
        assert_eq!(request.pedagogical_practices.len(), 4);
        assert_eq!(
            request.pedagogical_practices,
            vec![
                PedagogicalPractice::Contextual,
                PedagogicalPractice::Cooperative,
                PedagogicalPractice::default(),
                PedagogicalPractice::default(),
            ]
        );
    }

    #[test]
    fn shrinking_meetings_truncates_practices() {
        let mut request = valid_request();
        request.set_meetings(1);
        assert_eq!(
            request.pedagogical_practices,
            vec![PedagogicalPractice::Contextual]
        );
        request.set_meetings(0);
        assert!(request.pedagogical_practices.is_empty());
    }

    #[test]
    fn negative_meetings_is_a_meetings_error() {
        let mut request = valid_request();
        request.set_meetings(-1);
        assert!(request.pedagogical_practices.is_empty());

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(Field::Meetings),
            Some("Jumlah Pertemuan minimal 1.")
        );
    }

    #[test]
    fn set_practice_ignores_out_of_range_index() {
        let mut request = valid_request();
        request.set_practice(1, PedagogicalPractice::ProjectBased);
        request.set_practice(7, PedagogicalPractice::Flipped);
        assert_eq!(
            request.pedagogical_practices,
            vec![
                PedagogicalPractice::Contextual,
                PedagogicalPractice::ProjectBased
            ]
        );
    }

    #[test]
    fn toggle_dimension_adds_then_removes() {
        let mut request = valid_request();
        request.toggle_dimension(GraduateDimension::Health);
        assert!(request.graduate_dimensions.contains(&GraduateDimension::Health));
        request.toggle_dimension(GraduateDimension::Health);
        assert!(!request.graduate_dimensions.contains(&GraduateDimension::Health));
    }

    #[test]
    fn each_blank_field_reports_its_own_error() {
        let cases: Vec<(Field, fn(&mut LessonPlanRequest))> = vec![
            (Field::TeacherName, |r| r.teacher_name = "  ".into()),
            (Field::TeacherNip, |r| r.teacher_nip.clear()),
            (Field::Subject, |r| r.subject = "\t".into()),
            (Field::LearningObjectives, |r| r.learning_objectives.clear()),
            (Field::SubjectMatter, |r| r.subject_matter = " \n ".into()),
            (Field::Meetings, |r| r.set_meetings(0)),
            (Field::GraduateDimensions, |r| r.graduate_dimensions.clear()),
        ];

        for (field, break_it) in cases {
            let mut request = valid_request();
            break_it(&mut request);
            let errors = request.validate().unwrap_err();
            assert_eq!(errors.len(), 1, "expected only {field:?} to fail: {errors:?}");
            assert!(errors.contains(field));
            assert!(!request.is_valid());
        }
    }

    #[test]
    fn all_failures_are_collected_together() {
        let mut request = LessonPlanRequest::default();
        request.subject.clear();
        request.set_meetings(0);
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(
            errors.message_for(Field::Meetings),
            Some("Jumlah Pertemuan minimal 1.")
        );
    }

    #[test]
    fn mismatched_practice_count_is_rejected() {
        let mut request = valid_request();
        request.pedagogical_practices.pop();
        let errors = request.validate().unwrap_err();
        assert!(errors.contains(Field::PedagogicalPractices));
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let mut request = valid_request();
        request.subject = "Astronomi".into();
        assert!(request.validate().unwrap_err().contains(Field::Subject));
    }

    #[test]
    fn summaries_number_meetings_from_one() {
        let request = valid_request();
        assert_eq!(
            request.practices_summary(),
            "Pertemuan 1: Contextual Teaching and Learning (CTL), Pertemuan 2: Cooperative Learning"
        );
        assert_eq!(
            request.dimensions_summary(),
            "Keimanan & Ketakwaan, Penalaran Kritis, Kemandirian"
        );
    }

    #[test]
    fn deserializes_browser_payload() {
        let payload = serde_json::json!({
            "teacherName": "Ahmad",
            "teacherNip": "1985",
            "className": "VIII",
            "semester": "III",
            "subject": "Matematika",
            "learningObjectives": "Memahami bilangan bulat",
            "subjectMatter": "Bilangan bulat",
            "language": "Bahasa Inggris",
            "meetings": 1,
            "pedagogicalPractices": ["PjBL"],
            "graduateDimensions": ["Kreativitas"]
        });
        let request: LessonPlanRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.class_name, ClassLevel::Eighth);
        assert_eq!(request.integration_option, IntegrationOption::None);
        assert!(request.is_valid());
    }
}
