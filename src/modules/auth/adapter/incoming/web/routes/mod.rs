mod email_verification;
mod login_user;
mod logout_user;
mod password_reset;
mod profile;
mod refresh_token;
mod register_user;

pub use email_verification::{
    confirm_email_verification_handler, request_email_verification_handler,
    EmailVerifiedResponse, MessageResponse, __path_confirm_email_verification_handler,
    __path_request_email_verification_handler,
};
pub use login_user::{login_user_handler, LoginRequestDto, __path_login_user_handler};
pub use logout_user::{logout_user_handler, __path_logout_user_handler};
pub use password_reset::{
    confirm_password_reset_handler, request_password_reset_handler,
    __path_confirm_password_reset_handler, __path_request_password_reset_handler,
};
pub use profile::{
    get_profile_handler, update_profile_handler, __path_get_profile_handler,
    __path_update_profile_handler,
};
pub use refresh_token::{refresh_token_handler, RefreshTokenRequestDto, __path_refresh_token_handler};
pub use register_user::{
    register_user_handler, CreateUserRequest, RegisterUserResponse, RegisteredUser,
    __path_register_user_handler,
};
