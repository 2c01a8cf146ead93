use super::system::system_instruction_for;
use super::templates::{
    CLOSING_DIRECTIVE, VISUAL_AID_DIRECTIVE, assessment_appendix, greeting_instruction,
    integration_instruction, worksheet_block,
};
use crate::config::SchoolProfile;
use crate::lesson::LessonPlanRequest;

/// Turns a lesson-plan request into the generator prompt.
///
/// Building is pure: the same request and school always produce the same
/// string.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    school: SchoolProfile,
}

impl PromptBuilder {
    pub fn new(school: SchoolProfile) -> Self {
        Self { school }
    }

    pub fn school(&self) -> &SchoolProfile {
        &self.school
    }

    pub fn system_instruction(&self) -> String {
        system_instruction_for(&self.school)
    }

    pub fn build(&self, request: &LessonPlanRequest) -> String {
        let mut prompt = String::with_capacity(12 * 1024);

        prompt.push_str(&self.input_preamble(request));
        prompt.push('\n');
        prompt.push_str(STRUCTURE_DIRECTIVES);
        prompt.push('\n');
        prompt.push_str(&self.table_contents(request));

        if let Some(block) = integration_instruction(request.integration_option) {
            prompt.push('\n');
            prompt.push_str(&block);
            prompt.push('\n');
        }

        prompt.push('\n');
        prompt.push_str(&self.signature_directive(request));
        prompt.push('\n');
        prompt.push_str(&appendix(request));
        prompt.push('\n');
        prompt.push_str(VISUAL_AID_DIRECTIVE);
        prompt.push_str("\n\n");
        prompt.push_str(CLOSING_DIRECTIVE);
        prompt.push('\n');

        prompt
    }

    fn input_preamble(&self, request: &LessonPlanRequest) -> String {
        format!(
            "Berdasarkan input berikut:
- Nama Madrasah: {school}
- Nama Guru: {teacher}
- NIP Guru: {nip}
- Kelas: {class}
- Semester: {semester}
- Mata Pelajaran: {subject}
- Tujuan Pembelajaran: {objectives}
- Materi Pelajaran: {matter}
- Bahasa Pembuka/Penutup: {language}
- Jumlah Pertemuan: {meetings}
- Praktik Pedagogis per Pertemuan: {practices}
- Dimensi Lulusan: {dimensions}
- Opsi Integrasi Tambahan: {integration}
",
            school = self.school.name,
            teacher = request.teacher_name,
            nip = request.teacher_nip,
            class = request.class_name,
            semester = request.semester,
            subject = request.subject,
            objectives = request.learning_objectives,
            matter = request.subject_matter,
            language = request.language,
            meetings = request.meetings,
            practices = request.practices_summary(),
            dimensions = request.dimensions_summary(),
            integration = request.integration_option,
        )
    }

    fn table_contents(&self, request: &LessonPlanRequest) -> String {
        let greeting = greeting_instruction(request.language);
        format!(
            "**Isi Tabel RPM:**

a. **IDENTITAS**
   - Nama Madrasah: {school}
   - Mata Pelajaran: {subject}
   - Kelas/Semester: {class} / {semester}
   - Durasi Pertemuan: {meetings} x (2 x 40 menit)

b. **IDENTIFIKASI**
   - Siswa: Generate deskripsi singkat karakteristik umum siswa kelas {class} di madrasah tsaniyah.
   - Materi Pelajaran: {matter}
   - Capaian Dimensi Lulusan: {dimensions}
   - Topik Panca Cinta: Pilih 2-3 dimensi Kurikulum Berbasis Cinta (KBC) yang paling relevan dari [Cinta Allah dan Rasul-Nya, Cinta Ilmu, Cinta Lingkungan, Cinta Diri dan Sesama, Cinta Tanah Air] berdasarkan materi pelajaran.
   - Materi Insersi: Untuk setiap Topik Panca Cinta yang dipilih, tuliskan satu kalimat singkat yang menggambarkan nilai cinta yang diintegrasikan dalam pembelajaran.

c. **DESAIN PEMBELAJARAN**
   - Lintas Disiplin Ilmu: Generate 1-2 disiplin ilmu lain yang relevan dengan materi.
   - Tujuan Pembelajaran: {objectives}
   - Topik Pembelajaran: Buat judul topik yang lebih spesifik dan menarik dari input 'Materi Pelajaran'.
   - Praktik Pedagogis per Pertemuan: {practices}
   - Kemitraan Pembelajaran: Generate saran kemitraan yang relevan (misal: orang tua, perpustakaan sekolah).
   - Lingkungan Pembelajaran: Generate saran lingkungan belajar yang sesuai (misal: di dalam kelas, di luar kelas, laboratorium).
   - Pemanfaatan Digital: Generate saran tools digital relevan beserta tautan (contoh: Quizizz, Canva, YouTube).

d. **PENGALAMAN BELAJAR**
   - Memahami (berkesadaran, bermakna, menggembirakan): Generate langkah-langkah kegiatan awal. **{opening}** Setelah menjelaskan tujuan, tambahkan satu paragraf singkat untuk membangun koneksi emosional siswa dengan mengaitkan materi pada salah satu nilai KBC.
   - Mengaplikasi (berkesadaran, bermakna, menggembirakan): Generate langkah-langkah kegiatan inti detail untuk setiap pertemuan sesuai sintaks dari praktik pedagogis masing-masing ({practices}). Tambahkan instruksi spesifik untuk mendorong refleksi nilai KBC dalam aktivitas.
   - Refleksi (berkesadaran, bermakna, menggembirakan): Generate langkah-langkah kegiatan penutup. **{closing}**

e. **ASESMEN PEMBELAJARAN**
   - Asesmen Awal (diagnostik/apersepsi): Jelaskan metode asesmen awal (misal: pertanyaan pemantik lisan, kuis singkat).
   - Asesmen Formatif (for/as learning): Jelaskan metode asesmen formatif (misal: observasi partisipasi, penilaian LKPD, penilaian antar teman).
   - Asesmen Sumatif (of learning): Jelaskan metode asesmen sumatif (misal: tes tulis di akhir bab, penilaian proyek, presentasi).
",
            school = self.school.name,
            subject = request.subject,
            class = request.class_name,
            semester = request.semester,
            meetings = request.meetings,
            matter = request.subject_matter,
            dimensions = request.dimensions_summary(),
            objectives = request.learning_objectives,
            practices = request.practices_summary(),
            opening = greeting.opening,
            closing = greeting.closing,
        )
    }

    fn signature_directive(&self, request: &LessonPlanRequest) -> String {
        format!(
            "2.  **Tanda Tangan:** Setelah tabel utama, buatlah sebuah tabel baru untuk bagian tanda tangan dengan gaya `<table style=\"width: 100%; margin-top: 40px; border: none; text-align: center;\">`. Tabel ini harus memiliki satu baris (`<tr>`) dan dua kolom (`<td>`).
    - Kolom kiri: `<td style=\"width: 50%; border: none; line-height: 1.2;\">Mengetahui,<br/>Kepala {school}<div style=\"height: 60px;\"></div><b>{principal}</b><br/>NIP. {principal_nip}</td>`
    - Kolom kanan: `<td style=\"width: 50%; border: none; line-height: 1.2;\">{city}, [Generate tanggal hari ini format DD MMMM YYYY]<br/>Guru Mata Pelajaran<div style=\"height: 60px;\"></div><b>{teacher}</b><br/>NIP. {teacher_nip}</td>`
",
            school = self.school.name,
            principal = self.school.principal_name,
            principal_nip = self.school.principal_nip,
            city = self.school.city,
            teacher = request.teacher_name,
            teacher_nip = request.teacher_nip,
        )
    }
}

const STRUCTURE_DIRECTIVES: &str = "**STRUKTUR OUTPUT HTML UTAMA:**

Gunakan sebuah div kontainer utama dengan gaya `style=\"color: #000;\"`. Di dalamnya, buatlah struktur berikut:

1.  **Tabel RPM (Dua Kolom):** Buat sebuah tabel HTML (`<table>`) dengan kelas 'w-full border-collapse'. Kolom pertama adalah \"Komponen\" dan kedua \"Isi\".
    - Gunakan `<thead>` untuk header.
    - Gunakan `<tbody>` untuk konten.
    - Untuk setiap baris komponen, gunakan `<tr>`.
    - Kolom \"Komponen\" (`<td>`) harus bold dan rata atas (`style=\"font-weight: bold; vertical-align: top; width: 30%; padding: 8px; border: 1px solid #ddd;\"`).
    - Kolom \"Isi\" (`<td>`) harus rata kanan-kiri (`style=\"text-align: justify; padding: 8px; border: 1px solid #ddd;\"`).
    - Untuk header seksi seperti \"IDENTITAS\", gunakan `<tr style=\"background-color: #f2f2f2;\"><td colspan=\"2\" style=\"font-weight: bold; padding: 8px; border: 1px solid #ddd;\">NAMA SEKSI</td></tr>`.
";

fn appendix(request: &LessonPlanRequest) -> String {
    let mut appendix = String::from(
        "3.  **LAMPIRAN:** Gunakan `<div style=\"page-break-before: always;\"><h2>Lampiran</h2></div>` untuk memulai di halaman baru.\n",
    );
    for (index, practice) in request.pedagogical_practices.iter().enumerate() {
        appendix.push_str(&worksheet_block(index + 1, *practice, request.class_name));
    }
    appendix.push_str(&assessment_appendix(request.pedagogical_practices.len() + 1));
    appendix
}

/// Build the prompt for the default school profile
pub fn build_prompt(request: &LessonPlanRequest) -> String {
    PromptBuilder::default().build(request)
}
