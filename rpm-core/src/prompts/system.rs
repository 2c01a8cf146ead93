//! Fixed system instruction sent with every generation request

use crate::config::SchoolProfile;
use crate::config::constants::school;

/// Persona and formatting directive for the generator
pub const SYSTEM_INSTRUCTION: &str = "Anda adalah asisten ahli dalam pembuatan Rencana Pembelajaran Mendalam (RPM) untuk kurikulum madrasah di Indonesia, khususnya untuk MTsN 4 Jombang. Tugas Anda adalah membuat dokumen RPM yang lengkap, terstruktur, dan siap pakai dalam format HTML. Ikuti struktur dan instruksi di bawah ini dengan SANGAT TELITI menggunakan Ejaan Bahasa Indonesia yang baik dan benar. Pastikan semua teks berwarna hitam atau sangat gelap agar kontrasnya tinggi dan mudah dibaca. Jangan gunakan sintaks Markdown seperti **teks tebal** di dalam output HTML Anda; sebagai gantinya, gunakan tag HTML yang sesuai seperti `<b>` atau `<strong>`.";

/// System instruction addressed to the configured school
pub fn system_instruction_for(profile: &SchoolProfile) -> String {
    if profile.name == school::NAME {
        SYSTEM_INSTRUCTION.to_string()
    } else {
        SYSTEM_INSTRUCTION.replace(school::NAME, &profile.name)
    }
}
