use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::location::{OverrideStorage, StorageError, LOCATION_OVERRIDE_KEY};

/// Browsers drop cookies larger than this.
const MAX_COOKIE_BYTES: usize = 4096;

/// Keeps the visitor's override in the `location-override` cookie.
///
/// Changes are collected in the jar; return [`CookieStorage::into_jar`]
/// from the handler so they reach the browser.
pub struct CookieStorage {
    jar: CookieJar,
}

impl CookieStorage {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl OverrideStorage for CookieStorage {
    fn load(&self) -> Option<String> {
        let raw = self.jar.get(LOCATION_OVERRIDE_KEY)?.value().to_string();
        match urlencoding::decode(&raw) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(_) => Some(raw),
        }
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        let encoded = urlencoding::encode(value).into_owned();
        if encoded.len() > MAX_COOKIE_BYTES {
            return Err(StorageError::TooLarge {
                size: encoded.len(),
                limit: MAX_COOKIE_BYTES,
            });
        }
        let mut cookie = Cookie::new(LOCATION_OVERRIDE_KEY, encoded);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::days(30));
        self.jar = self.jar.clone().add(cookie);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let mut removal = Cookie::new(LOCATION_OVERRIDE_KEY, "");
        removal.set_path("/");
        self.jar = self.jar.clone().remove(removal);
        Ok(())
    }
}
