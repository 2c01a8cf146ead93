pub mod generation;
pub mod progress;
pub mod school;
pub mod server;

pub use generation::GenerationConfig;
pub use progress::ProgressConfig;
pub use school::SchoolProfile;
pub use server::ServerConfig;
