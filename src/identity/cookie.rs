//! Reading and writing the encrypted identity cookie.
//!
//! The cookie value is `<user id>:<expiry as a unix timestamp>`. The expiry is
//! checked on the server because clients may ignore the cookie's `Expires`
//! attribute.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use super::{Identity, UserID};

pub(crate) const COOKIE_IDENTITY: &str = "identity";
/// The default duration for which identity cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::days(1);

/// Add an identity cookie for `user_id` to the cookie jar.
///
/// The cookie expires `duration` from now.
pub fn set_identity_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc() + duration;
    let value = format!("{}:{}", user_id.as_i64(), expiry.unix_timestamp());

    jar.add(
        Cookie::build((COOKIE_IDENTITY, value))
            .path("/")
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the identity cookie to an invalid value and set its max age to zero, which should delete
/// the cookie on the client side.
pub fn clear_identity_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_IDENTITY, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

pub(crate) fn get_identity_from_cookie(jar: &PrivateCookieJar) -> Identity {
    let Some(cookie) = jar.get(COOKIE_IDENTITY) else {
        return Identity::Anonymous;
    };

    match parse_identity(cookie.value_trimmed(), OffsetDateTime::now_utc()) {
        Some(user_id) => Identity::User(user_id),
        None => {
            tracing::debug!("Ignoring invalid or expired identity cookie.");
            Identity::Anonymous
        }
    }
}

fn parse_identity(value: &str, now: OffsetDateTime) -> Option<UserID> {
    let (raw_user_id, raw_expiry) = value.split_once(':')?;
    let user_id: i64 = raw_user_id.parse().ok()?;
    let expiry: i64 = raw_expiry.parse().ok()?;

    if expiry <= now.unix_timestamp() {
        return None;
    }

    Some(UserID::new(user_id))
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::identity::{Identity, UserID};

    use super::{
        COOKIE_IDENTITY, DEFAULT_COOKIE_DURATION, clear_identity_cookie, get_identity_from_cookie,
        parse_identity, set_identity_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[test]
    fn can_set_cookie() {
        let jar = set_identity_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION);

        let cookie = jar.get(COOKIE_IDENTITY).unwrap();

        assert!(cookie.value().starts_with("1:"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn get_identity_from_cookie_succeeds() {
        let user_id = UserID::new(1);
        let jar = set_identity_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION);

        let identity = get_identity_from_cookie(&jar);

        assert_eq!(identity, Identity::User(user_id));
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        assert_eq!(get_identity_from_cookie(&get_jar()), Identity::Anonymous);
    }

    #[test]
    fn expired_cookie_is_anonymous() {
        let jar = set_identity_cookie(get_jar(), UserID::new(1), Duration::seconds(-10));

        assert_eq!(get_identity_from_cookie(&jar), Identity::Anonymous);
    }

    #[test]
    fn cleared_cookie_is_anonymous() {
        let jar = set_identity_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION);

        let jar = clear_identity_cookie(jar);
        let cookie = jar.get(COOKIE_IDENTITY).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(get_identity_from_cookie(&jar), Identity::Anonymous);
    }

    #[test]
    fn parse_identity_rejects_malformed_values() {
        let now = datetime!(2024-01-01 00:00:00 UTC);

        assert_eq!(parse_identity("", now), None);
        assert_eq!(parse_identity("12", now), None);
        assert_eq!(parse_identity("abc:1900000000", now), None);
        assert_eq!(parse_identity("12:soon", now), None);
    }

    #[test]
    fn parse_identity_checks_expiry() {
        let now = datetime!(2024-01-01 00:00:00 UTC);
        let expiry = now.unix_timestamp();

        assert_eq!(parse_identity(&format!("3:{}", expiry + 1), now), Some(UserID::new(3)));
        assert_eq!(parse_identity(&format!("3:{expiry}"), now), None);
    }
}
