/// Model ID constants for the Gemini generator
pub mod models {
    pub mod google {
        pub const DEFAULT_MODEL: &str = GEMINI_2_5_FLASH;
        pub const SUPPORTED_MODELS: &[&str] =
            &[GEMINI_2_5_FLASH, GEMINI_2_5_PRO, GEMINI_2_5_FLASH_LITE];

        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";
        pub const GEMINI_2_5_FLASH_LITE: &str = "gemini-2.5-flash-lite";
    }
}

/// Endpoint constants
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// QR image renderer; the target link goes into the `data` query parameter
    pub const QR_CODE_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
    pub const QR_CODE_SIZE: &str = "150x150";
}

/// Environment variable names
pub mod env {
    /// Single credential consumed by the generator
    pub const API_KEY: &str = "API_KEY";
}

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5780";
    pub const MODULE_NAME: &str = "rpm-gen";
}

/// Timeouts applied to the generation call, in seconds
pub mod timeouts {
    pub const CONNECT_SECS: u64 = 10;
    pub const FIRST_CHUNK_SECS: u64 = 90;
    pub const CHUNK_SECS: u64 = 60;
    pub const REQUEST_SECS: u64 = 300;
}

/// Loading-indicator constants
pub mod progress {
    pub const CEILING: f64 = 95.0;
    pub const DAMPING: f64 = 0.05;
    pub const INITIAL_BUMP: f64 = 5.0;
    pub const COMPLETE: f64 = 100.0;
    pub const FRAGMENTS_PER_MESSAGE: usize = 10;
    pub const CLEAR_DELAY_MS: u64 = 500;

    pub const STATUS_MESSAGES: &[&str] = &[
        "Menganalisis tujuan pembelajaran...",
        "Merancang kegiatan inti yang menarik...",
        "Menyiapkan placeholder untuk visual...",
        "Mengintegrasikan nilai-nilai KBC...",
        "Menyiapkan asesmen dan lampiran...",
        "Menyelesaikan dokumen akhir...",
    ];

    pub const SPINNER_COLORS: &[&str] = &[
        "cyan", "indigo", "purple", "pink", "orange", "teal",
    ];
}

/// School identity defaults embedded in generated documents
pub mod school {
    pub const NAME: &str = "MTsN 4 Jombang";
    pub const CITY: &str = "Jombang";
    pub const PRINCIPAL_NAME: &str = "Sulthon Sulaiman, M.Pd.I.";
    pub const PRINCIPAL_NIP: &str = "19810616 2005011003";
}

/// Configuration file names
pub mod files {
    pub const CONFIG_FILE: &str = "rpm.toml";
    pub const CONFIG_DIR: &str = ".rpm";
}
