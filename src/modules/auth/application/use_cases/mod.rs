pub mod create_user;
pub mod email_verification;
pub mod fetch_profile;
pub mod login_user;
pub mod logout_user;
pub mod password_reset;
pub mod refresh_token;
pub mod update_profile;
