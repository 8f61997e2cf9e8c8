mod command_errors;
pub mod complete_direct_upload;
pub mod init_direct_upload;
pub mod manage_media;
pub mod upload_media;
pub mod upload_progress;

pub use complete_direct_upload::*;
pub use init_direct_upload::*;
pub use manage_media::*;
pub use upload_media::*;
pub use upload_progress::*;
