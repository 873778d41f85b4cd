//! Authentication: password hashing, signed session credentials, and the
//! service + extractor that tie them to requests.

mod extract;
mod password;
mod session;
mod token;

pub use extract::AuthUser;
pub use password::{hash_password, verify_password, PasswordError};
pub use session::{
    normalize_email, removal_cookie, session_cookie, SessionService, TOKEN_COOKIE,
};
pub use token::{Claims, TokenError, TokenSigner, SESSION_TTL_DAYS};
