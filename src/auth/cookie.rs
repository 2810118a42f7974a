//! Defines functions for handling user authentication with cookies.
//!
//! A logged in user has two private cookies: one holding their user ID and
//! one holding the session expiry. Both are encrypted and signed, so the
//! client cannot read or forge them.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, user::UserID};

pub(crate) const COOKIE_USER_ID: &str = "user_id";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(15);

/// Date time format for the cookie expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
         sign:mandatory]:[offset_minute]:[offset_second]"
);

fn auth_cookie(name: &'static str, value: String, expiry: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((name, value))
        .expires(expiry)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .path("/")
        .build()
}

/// Add the auth cookies to `jar`, logging in `user_id` until `duration` from now.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if the expiry cannot be formatted.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string so that the hour always has two digits.
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

    Ok(jar
        .add(auth_cookie(
            COOKIE_USER_ID,
            user_id.as_i64().to_string(),
            expiry,
        ))
        .add(auth_cookie(COOKIE_EXPIRY, expiry_string, expiry)))
}

/// Overwrite the auth cookies with expired values so the client deletes them.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let expire_now = |name: &'static str| {
        let mut cookie = auth_cookie(name, "deleted".to_owned(), OffsetDateTime::UNIX_EPOCH);
        cookie.set_max_age(Duration::ZERO);
        cookie
    };

    jar.add(expire_now(COOKIE_USER_ID))
        .add(expire_now(COOKIE_EXPIRY))
}

/// Push the session expiry out to `duration` from now, unless it already
/// expires later than that.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if either auth cookie is missing,
/// - [Error::InvalidDateFormat] if the expiry cannot be parsed, extended or formatted.
pub fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;
    let current_expiry = extract_date_time(&expiry_cookie)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::InvalidDateFormat("cookie expiry overflowed".to_owned()))?;

    let expiry = max(current_expiry, new_expiry);
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

    let mut user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let mut expiry_cookie = expiry_cookie;

    user_id_cookie.set_expires(expiry);
    expiry_cookie.set_expires(expiry);
    expiry_cookie.set_value(expiry_string);

    Ok(jar.add(user_id_cookie).add(expiry_cookie))
}

/// Get the ID of the logged in user from `jar`.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if either auth cookie is missing,
/// - [Error::InvalidCredentials] if the cookies hold invalid values or the session has expired.
pub fn get_user_id_from_auth_cookie(jar: &PrivateCookieJar) -> Result<UserID, Error> {
    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    let expiry = extract_date_time(&expiry_cookie).map_err(|_| Error::InvalidCredentials)?;

    if expiry <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    let id: i64 = user_id_cookie
        .value_trimmed()
        .parse()
        .map_err(|_| Error::InvalidCredentials)?;

    Ok(UserID::new(id))
}

fn extract_date_time(cookie: &Cookie) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::parse(cookie.value_trimmed(), DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string()))
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime, UtcOffset, macros::datetime};

    use crate::{Error, user::UserID};

    use super::{
        COOKIE_EXPIRY, COOKIE_USER_ID, DATE_TIME_FORMAT, DEFAULT_COOKIE_DURATION,
        extend_auth_cookie_duration_if_needed, extract_date_time, get_user_id_from_auth_cookie,
        invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[track_caller]
    fn assert_date_time_close(left: OffsetDateTime, right: OffsetDateTime) {
        assert!(
            (left - right).abs() < Duration::seconds(1),
            "got date time {left:?}, want {right:?}"
        );
    }

    #[test]
    fn can_extract_date_time_at_midnight() {
        let want = datetime!(2021-01-01 00:00:00).assume_offset(UtcOffset::UTC);
        let cookie = Cookie::build((COOKIE_EXPIRY, want.format(DATE_TIME_FORMAT).unwrap())).build();

        let got = extract_date_time(&cookie).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn set_cookie_then_get_user_id() {
        let user_id = UserID::new(1);

        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();

        assert_eq!(get_user_id_from_auth_cookie(&jar), Ok(user_id));
        let expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();
        assert_date_time_close(
            extract_date_time(&expiry_cookie).unwrap(),
            OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION,
        );
    }

    #[test]
    fn get_user_id_fails_on_empty_jar() {
        assert_eq!(
            get_user_id_from_auth_cookie(&get_jar()),
            Err(Error::CookieMissing)
        );
    }

    #[test]
    fn get_user_id_fails_on_expired_session() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), Duration::seconds(-5)).unwrap();

        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn get_user_id_fails_on_garbage_user_id() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION)
            .unwrap()
            .add(Cookie::new(COOKIE_USER_ID, "FOOBAR"));

        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn can_extend_cookie_duration() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), Duration::seconds(5)).unwrap();

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(10)).unwrap();

        let want = OffsetDateTime::now_utc() + Duration::minutes(10);
        let user_id_cookie = jar.get(COOKIE_USER_ID).unwrap();
        let expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();
        assert_date_time_close(extract_date_time(&expiry_cookie).unwrap(), want);
        assert_date_time_close(user_id_cookie.expires_datetime().unwrap(), want);
        assert_date_time_close(expiry_cookie.expires_datetime().unwrap(), want);
    }

    #[test]
    fn extending_never_shortens_session() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), Duration::days(7)).unwrap();
        let want = jar.get(COOKIE_USER_ID).unwrap().expires_datetime();

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(5)).unwrap();

        assert_eq!(jar.get(COOKIE_USER_ID).unwrap().expires_datetime(), want);
    }

    #[test]
    fn invalidate_auth_cookie_logs_out() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let jar = invalidate_auth_cookie(jar);
        let cookie = jar.get(COOKIE_USER_ID).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(get_user_id_from_auth_cookie(&jar).is_err());
    }
}
