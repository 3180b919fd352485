use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PromoCode {
    pub promo_code_id: i32,
    pub promo_code: String,
    pub discount: i64,
    pub expires_at: Option<NaiveDateTime>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
}

impl PromoCode {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// A code without a usage limit never runs out.
    pub fn is_valid(&self) -> bool {
        self.usage_limit.is_none_or(|limit| self.used_count < limit)
    }

    pub fn active_discount(&self, now: NaiveDateTime) -> Option<i64> {
        (!self.is_expired(now) && self.is_valid()).then_some(self.discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn promo(expires_in: Option<Duration>, usage_limit: Option<i32>, used_count: i32) -> PromoCode {
        let now = Utc::now().naive_utc();
        PromoCode {
            promo_code_id: 1,
            promo_code: "SPRING".into(),
            discount: 5,
            expires_at: expires_in.map(|d| now + d),
            usage_limit,
            used_count,
        }
    }

    #[test]
    fn code_without_expiry_or_limit_is_active() {
        let now = Utc::now().naive_utc();
        assert_eq!(promo(None, None, 100).active_discount(now), Some(5));
    }

    #[test]
    fn expired_code_yields_no_discount() {
        let now = Utc::now().naive_utc();
        let code = promo(Some(Duration::hours(-1)), None, 0);

        assert!(code.is_expired(now));
        assert_eq!(code.active_discount(now), None);
    }

    #[test]
    fn exhausted_code_is_invalid() {
        let now = Utc::now().naive_utc();
        let code = promo(Some(Duration::days(1)), Some(3), 3);

        assert!(!code.is_expired(now));
        assert!(!code.is_valid());
        assert_eq!(code.active_discount(now), None);
    }
}
