//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{
    DomainError, IdentityProvider, PaymentProvider, User, UserProfile, UserRole,
    VerificationStatus,
};
use haven::ports::ProfileRepository;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    phone_number: Option<String>,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            phone_number: row.phone_number,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            role: UserRole::parse(&row.role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    account_number: Option<String>,
    paystack_bank_code: Option<String>,
    flutterwave_bank_code: Option<String>,
    paystack_account_name: Option<String>,
    flutterwave_account_name: Option<String>,
    paystack_account_status: String,
    flutterwave_account_status: String,
    paystack_recipient_code: Option<String>,
    bvn_status: String,
    bvn_provider: String,
    bvn_error: Option<String>,
    nin_status: String,
    nin_provider: String,
    nin_error: Option<String>,
    photo_url: Option<String>,
    photo_public_id: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            account_number: row.account_number,
            paystack_bank_code: row.paystack_bank_code,
            flutterwave_bank_code: row.flutterwave_bank_code,
            paystack_account_name: row.paystack_account_name,
            flutterwave_account_name: row.flutterwave_account_name,
            paystack_account_status: VerificationStatus::parse(&row.paystack_account_status),
            flutterwave_account_status: VerificationStatus::parse(&row.flutterwave_account_status),
            paystack_recipient_code: row.paystack_recipient_code,
            bvn_status: VerificationStatus::parse(&row.bvn_status),
            bvn_provider: IdentityProvider::parse(&row.bvn_provider),
            bvn_error: row.bvn_error,
            nin_status: VerificationStatus::parse(&row.nin_status),
            nin_provider: IdentityProvider::parse(&row.nin_provider),
            nin_error: row.nin_error,
            photo_url: row.photo_url,
            photo_public_id: row.photo_public_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_profile(&self, profile_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row =
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles (
                id, user_id, account_number, paystack_bank_code, flutterwave_bank_code,
                paystack_account_name, flutterwave_account_name,
                paystack_account_status, flutterwave_account_status,
                paystack_recipient_code, bvn_status, bvn_provider, bvn_error,
                nin_status, nin_provider, nin_error, photo_url, photo_public_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (user_id) DO UPDATE SET
                account_number = EXCLUDED.account_number,
                paystack_bank_code = EXCLUDED.paystack_bank_code,
                flutterwave_bank_code = EXCLUDED.flutterwave_bank_code,
                photo_url = EXCLUDED.photo_url,
                photo_public_id = EXCLUDED.photo_public_id,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.account_number)
        .bind(&profile.paystack_bank_code)
        .bind(&profile.flutterwave_bank_code)
        .bind(&profile.paystack_account_name)
        .bind(&profile.flutterwave_account_name)
        .bind(profile.paystack_account_status.as_str())
        .bind(profile.flutterwave_account_status.as_str())
        .bind(&profile.paystack_recipient_code)
        .bind(profile.bvn_status.as_str())
        .bind(profile.bvn_provider.as_str())
        .bind(&profile.bvn_error)
        .bind(profile.nin_status.as_str())
        .bind(profile.nin_provider.as_str())
        .bind(&profile.nin_error)
        .bind(&profile.photo_url)
        .bind(&profile.photo_public_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn set_account_resolution(
        &self,
        profile_id: Uuid,
        provider: PaymentProvider,
        account_name: Option<String>,
        status: VerificationStatus,
    ) -> Result<(), DomainError> {
        let query = match provider {
            PaymentProvider::Paystack => {
                r#"
                UPDATE user_profiles
                SET paystack_account_name = $2, paystack_account_status = $3, updated_at = NOW()
                WHERE id = $1
                "#
            }
            PaymentProvider::Flutterwave => {
                r#"
                UPDATE user_profiles
                SET flutterwave_account_name = $2, flutterwave_account_status = $3, updated_at = NOW()
                WHERE id = $1
                "#
            }
            PaymentProvider::NoneYet => {
                return Err(DomainError::Validation(
                    "account resolution requires a concrete provider".into(),
                ))
            }
        };

        sqlx::query(query)
            .bind(profile_id)
            .bind(account_name)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn set_recipient_code(
        &self,
        profile_id: Uuid,
        recipient_code: String,
    ) -> Result<(), DomainError> {
        // Never overwrite an existing code.
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET paystack_recipient_code = $2, updated_at = NOW()
            WHERE id = $1 AND paystack_recipient_code IS NULL
            "#,
        )
        .bind(profile_id)
        .bind(recipient_code)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn mark_bvn_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET bvn_status = 'verified', bvn_provider = $2, bvn_error = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .bind(provider.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn mark_bvn_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET bvn_status = 'failed', bvn_error = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn mark_nin_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET nin_status = 'verified', nin_provider = $2, nin_error = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .bind(provider.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn mark_nin_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET nin_status = 'failed', nin_error = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
