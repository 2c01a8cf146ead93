//! Prompt fragments selected by the form's closed choices

use crate::lesson::{ClassLevel, GreetingLanguage, IntegrationOption, PedagogicalPractice};

/// Highlight colour for child-friendly-school insertions
pub const SRA_HIGHLIGHT: &str = "#fff59d";
/// Highlight colour for literacy/numeracy insertions
pub const TKA_HIGHLIGHT: &str = "#bbdefb";

/// Opening and closing greeting instructions for one language choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingInstruction {
    pub opening: &'static str,
    pub closing: &'static str,
}

pub fn greeting_instruction(language: GreetingLanguage) -> GreetingInstruction {
    match language {
        GreetingLanguage::None => GreetingInstruction {
            opening: "Mulai kegiatan awal ini dengan salam pembuka yang umum dan sopan sesuai konteks kelas.",
            closing: "Akhiri kegiatan penutup ini dengan salam penutup yang umum dan sopan sesuai konteks kelas.",
        },
        GreetingLanguage::Arabic => GreetingInstruction {
            opening: "Mulai kegiatan awal ini dengan salam pembuka dalam Bahasa Arab. Tuliskan transliterasi Latin terlebih dahulu, kemudian tulisan Arabnya, contoh: Assalamu'alaikum warahmatullahi wabarakatuh (السَّلَامُ عَلَيْكُمْ وَرَحْمَةُ اللهِ وَبَرَكَاتُهُ).",
            closing: "Akhiri kegiatan penutup ini dengan salam penutup dalam Bahasa Arab. Tuliskan transliterasi Latin terlebih dahulu, kemudian tulisan Arabnya, contoh: Wassalamu'alaikum warahmatullahi wabarakatuh (وَالسَّلَامُ عَلَيْكُمْ وَرَحْمَةُ اللهِ وَبَرَكَاتُهُ).",
        },
        GreetingLanguage::English => GreetingInstruction {
            opening: "Mulai kegiatan awal ini dengan salam pembuka dalam Bahasa Inggris, contoh: \"Good morning, everyone! How are you today?\"",
            closing: "Akhiri kegiatan penutup ini dengan salam penutup dalam Bahasa Inggris, contoh: \"Thank you for your attention. See you at our next meeting!\"",
        },
    }
}

/// Extra instruction block for the chosen integration option
pub fn integration_instruction(option: IntegrationOption) -> Option<String> {
    match option {
        IntegrationOption::None => None,
        IntegrationOption::ChildFriendlySchool => Some(format!(
            r#"**INTEGRASI NILAI SRA (SEKOLAH RAMAH ANAK):**
Sisipkan nilai-nilai Sekolah Ramah Anak (anti perundungan, partisipasi anak, non-diskriminasi, keselamatan, penghargaan terhadap pendapat siswa) ke dalam bagian Pengalaman Belajar, Asesmen, dan setiap LKPD.
- Setiap kalimat atau paragraf sisipan SRA WAJIB dibungkus dengan `<span style="background-color: {SRA_HIGHLIGHT};">...</span>`.
- Akhiri setiap sisipan dengan label `<b>[SRA]</b>` agar mudah dikenali saat supervisi.
- Sisipan harus menyatu dengan alur kegiatan, bukan daftar terpisah."#
        )),
        IntegrationOption::LiteracyNumeracy => Some(format!(
            r#"**INTEGRASI LITERASI/NUMERASI (TKA):**
Sisipkan penguatan literasi membaca dan numerasi yang relevan dengan materi ke dalam Pengalaman Belajar, LKPD, dan Instrumen Asesmen.
- Setiap sisipan literasi/numerasi WAJIB dibungkus dengan `<span style="background-color: {TKA_HIGHLIGHT};">...</span>` dan diakhiri label `<b>[TKA]</b>`.
- WAJIB: setiap butir soal asesmen (diagnostik, formatif, sumatif, dan soal di LKPD) disusun dengan format stimulus lalu pertanyaan. Sajikan stimulus terlebih dahulu (teks bacaan singkat, data, tabel, atau grafik), kemudian pertanyaan yang hanya dapat dijawab dengan memahami stimulus tersebut.
- Jangan membuat butir soal tanpa stimulus."#
        )),
    }
}

/// Worksheet (LKPD) appendix block for one meeting
pub fn worksheet_block(meeting: usize, practice: PedagogicalPractice, class: ClassLevel) -> String {
    format!(
        r#"<div style="page-break-before: always;">
<h3><b>Lampiran {meeting}: Lembar Kerja Peserta Didik (Pertemuan Ke-{meeting})</b></h3>
<p><b>PENTING:</b> Desain LKPD ini secara spesifik untuk mendukung praktik pedagogis <b>{practice}</b>.</p>
<h4><b>A. Identitas</b></h4>
<p>Nama: _______________________<br>
Kelas: {class}<br>
No. Absen: _______________________<br>
Pertemuan Ke: {meeting}</p>
<h4><b>B. Petunjuk Penggunaan</b></h4>
<p>Jelaskan cara mengerjakan LKPD yang disesuaikan dengan sintaks dari <b>{practice}</b>.</p>
<h4><b>C. Kegiatan Pembelajaran (Sintaks: {practice})</b></h4>
<p>Integrasikan sintaks dan pengalaman belajar tanpa menggunakan tabel. Buat kegiatan yang relevan dengan sintaks <b>{practice}</b>. Misalnya, jika PjBL, fokus pada langkah-langkah proyek. Jika Inkuiri-Discovery, fokus pada pertanyaan penuntun dan observasi.</p>
<h5><b>1. Memahami</b></h5>
<p>Sajikan ringkasan materi singkat yang relevan untuk pertemuan ini + 2-3 pertanyaan pemahaman kunci.</p>
<h5><b>2. Mengaplikasikan</b></h5>
<p>Berikan 1 tugas inti atau studi kasus yang mencerminkan sintaks <b>{practice}</b> secara nyata, dengan instruksi yang jelas.</p>
<h5><b>3. Merefleksikan</b></h5>
<p>Berikan 2-3 pertanyaan refleksi yang mendalam terkait pengalaman belajar siswa menggunakan metode <b>{practice}</b> pada pertemuan ini.</p>
<h4><b>D. Penutup</b></h4>
<p>Berikan sebuah kalimat penyemangat dan checklist pemahaman diri sederhana.</p>
</div>
"#
    )
}

/// Assessment-instrument appendix that follows the worksheets
pub fn assessment_appendix(number: usize) -> String {
    format!(
        r#"<div style="page-break-before: always;">
<h3><b>Lampiran {number}: Instrumen Asesmen</b></h3>
<h4><b>A. Asesmen Diagnostik (Awal)</b></h4>
<p>Buat 5 soal pertanyaan pemantik atau kuis singkat yang relevan dengan materi, beserta kunci jawabannya, untuk mengukur pemahaman awal siswa.</p>
<h4><b>B. Instrumen Asesmen Formatif</b></h4>
<p><b>PENTING:</b> Buat instrumen yang relevan dengan metode asesmen formatif yang Anda jelaskan di bagian E.2. Misalnya: Jika penilaian LKPD, buat rubrik penilaian detail untuk setiap LKPD. Jika observasi, buat lembar ceklis observasi partisipasi siswa.</p>
<h4><b>C. Instrumen Asesmen Sumatif</b></h4>
<p><b>PENTING:</b> Buat instrumen yang relevan dengan metode asesmen sumatif yang Anda jelaskan di bagian E.3. Misalnya: Jika tes tulis, buat 5-10 soal pilihan ganda atau esai lengkap dengan kunci jawaban dan pedoman penskoran. Jika penilaian proyek/produk, buat rubrik penilaian yang komprehensif.</p>
<h4><b>D. Rubrik Penilaian Sikap</b></h4>
<p>Buat satu tabel rubrik HTML untuk menilai sikap siswa yang mencakup dimensi lulusan yang dipilih.</p>
</div>
"#
    )
}

pub const VISUAL_AID_DIRECTIVE: &str = r#"**ALAT BANTU VISUAL DAN TAUTAN:**
- Saat menyarankan video, gambar, simulasi, atau sumber daring lain, tuliskan tautannya sebagai placeholder `[Visual: URL]` dengan URL lengkap yang diawali https://.
- Untuk sumber yang perlu dibuka siswa melalui gawai saat mengerjakan LKPD, tuliskan placeholder `[QR Code: URL]`.
- Jangan membuat tag `<a>` atau `<img>` sendiri untuk placeholder tersebut; placeholder akan diubah otomatis."#;

pub const CLOSING_DIRECTIVE: &str =
    "Pastikan seluruh output adalah satu blok kode HTML yang valid dan rapi.";
