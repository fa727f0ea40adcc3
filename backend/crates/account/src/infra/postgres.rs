//! PostgreSQL Repository Implementations

use auth::UserRole;
use auth::domain::value_object::user_password::UserPassword;
use chrono::{DateTime, Utc};
use kernel::id::{AddressId, TeamId, UserId};
use kernel::pagination::{Page, PageParams};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::address::Address;
use crate::domain::entity::profile::Profile;
use crate::domain::entity::team::{Team, TeamMember, TeamMembership, ensure_owner_remains};
use crate::domain::repository::{AddressRepository, ProfileRepository, TeamRepository};
use crate::domain::value_object::team_role::TeamRole;
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = r#"
    user_id,
    email,
    full_name,
    phone,
    user_role,
    created_at,
    updated_at
"#;

const ADDRESS_COLUMNS: &str = r#"
    address_id,
    user_id,
    recipient,
    phone,
    line1,
    line2,
    city,
    province,
    postal_code,
    is_default,
    created_at
"#;

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAccountRepository {
    async fn find_profile(&self, user_id: &UserId) -> AccountResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn find_profile_by_email(&self, email: &str) -> AccountResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            PROFILE_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn save_profile(&self, profile: &Profile) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, phone = $3, updated_at = $4
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn password_hash(&self, user_id: &UserId) -> AccountResult<Option<UserPassword>> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash.map(UserPassword::from_phc_string).transpose()?)
    }

    async fn update_password(&self, user_id: &UserId, hash: &UserPassword) -> AccountResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(hash.as_phc_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_profiles(
        &self,
        query: Option<&str>,
        params: &PageParams,
    ) -> AccountResult<Page<Profile>> {
        let pattern = query.map(|q| format!("%{}%", q.replace('%', "\\%").replace('_', "\\_")));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE $1::text IS NULL OR email ILIKE $1 OR full_name ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {} FROM users
            WHERE $1::text IS NULL OR email ILIKE $1 OR full_name ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            PROFILE_COLUMNS
        ))
        .bind(&pattern)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| r.into_profile())
            .collect::<AccountResult<Vec<_>>>()?;

        Ok(Page::new(items, params, total))
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AccountResult<bool> {
        let result =
            sqlx::query("UPDATE users SET user_role = $2, updated_at = now() WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .bind(role.code())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl PgAccountRepository {
    /// Serialize address-book writes of one user on the `users` row
    async fn lock_user(tx: &mut Transaction<'_, Postgres>, user_id: &UserId) -> AccountResult<()> {
        sqlx::query("SELECT 1 FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id.as_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(AccountError::UserNotFound)?;
        Ok(())
    }
}

impl AddressRepository for PgAccountRepository {
    async fn list_addresses(&self, user_id: &UserId) -> AccountResult<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            r#"
            SELECT {} FROM addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, created_at DESC
            "#,
            ADDRESS_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AddressRow::into_address).collect())
    }

    async fn find_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {} FROM addresses WHERE address_id = $1 AND user_id = $2",
            ADDRESS_COLUMNS
        ))
        .bind(address_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }

    async fn insert_address(
        &self,
        address: &Address,
        make_default: bool,
    ) -> AccountResult<Address> {
        let mut tx = self.pool.begin().await?;
        Self::lock_user(&mut tx, &address.user_id).await?;

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM addresses WHERE user_id = $1")
                .bind(address.user_id.as_uuid())
                .fetch_one(&mut *tx)
                .await?;

        let is_default = Address::becomes_default(existing, make_default);
        if is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND is_default")
                .bind(address.user_id.as_uuid())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO addresses (
                address_id, user_id, recipient, phone, line1, line2,
                city, province, postal_code, is_default, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(address.address_id.as_uuid())
        .bind(address.user_id.as_uuid())
        .bind(&address.recipient)
        .bind(&address.phone)
        .bind(&address.line1)
        .bind(&address.line2)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.postal_code)
        .bind(is_default)
        .bind(address.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Address {
            is_default,
            ..address.clone()
        })
    }

    async fn update_address(&self, address: &Address) -> AccountResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE addresses
            SET recipient = $3, phone = $4, line1 = $5, line2 = $6,
                city = $7, province = $8, postal_code = $9
            WHERE address_id = $1 AND user_id = $2
            "#,
        )
        .bind(address.address_id.as_uuid())
        .bind(address.user_id.as_uuid())
        .bind(&address.recipient)
        .bind(&address.phone)
        .bind(&address.line1)
        .bind(&address.line2)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.postal_code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<bool> {
        let mut tx = self.pool.begin().await?;
        Self::lock_user(&mut tx, user_id).await?;

        let was_default = sqlx::query_scalar::<_, bool>(
            "DELETE FROM addresses WHERE address_id = $1 AND user_id = $2 RETURNING is_default",
        )
        .bind(address_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(was_default) = was_default else {
            return Ok(false);
        };

        if was_default {
            sqlx::query(
                r#"
                UPDATE addresses SET is_default = TRUE
                WHERE address_id = (
                    SELECT address_id FROM addresses
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    LIMIT 1
                )
                "#,
            )
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn set_default_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<bool> {
        let mut tx = self.pool.begin().await?;
        Self::lock_user(&mut tx, user_id).await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM addresses WHERE address_id = $1 AND user_id = $2)",
        )
        .bind(address_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Ok(false);
        }

        // Clear first: the partial unique index allows one default at a time
        sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND is_default")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE addresses SET is_default = TRUE WHERE address_id = $1")
            .bind(address_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

// ============================================================================
// Team Repository Implementation
// ============================================================================

impl PgAccountRepository {
    /// Lock the membership row and count owners, under the team row lock
    async fn lock_member(
        tx: &mut Transaction<'_, Postgres>,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> AccountResult<(TeamRole, i64)> {
        sqlx::query("SELECT 1 FROM teams WHERE team_id = $1 FOR UPDATE")
            .bind(team_id.as_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(AccountError::TeamNotFound)?;

        let role = sqlx::query_scalar::<_, String>(
            "SELECT team_role FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AccountError::MemberNotFound)?;

        let owners = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND team_role = 'owner'",
        )
        .bind(team_id.as_uuid())
        .fetch_one(&mut **tx)
        .await?;

        Ok((parse_team_role(&role)?, owners))
    }
}

impl TeamRepository for PgAccountRepository {
    async fn create_team(&self, team: &Team, owner: &UserId) -> AccountResult<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO teams (team_id, name, slug, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(team.team_id.as_uuid())
        .bind(&team.name)
        .bind(&team.slug)
        .bind(team.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AccountError::SlugTaken);
            }
            Err(e) => return Err(e.into()),
        }

        sqlx::query("INSERT INTO team_members (team_id, user_id, team_role) VALUES ($1, $2, $3)")
            .bind(team.team_id.as_uuid())
            .bind(owner.as_uuid())
            .bind(TeamRole::Owner.code())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn teams_of(&self, user_id: &UserId) -> AccountResult<Vec<TeamMembership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT t.team_id, t.name, t.slug, t.created_at, m.team_role
            FROM team_members m
            JOIN teams t ON t.team_id = m.team_id
            WHERE m.user_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MembershipRow::into_membership).collect()
    }

    async fn member_role(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> AccountResult<Option<TeamRole>> {
        let role = sqlx::query_scalar::<_, String>(
            "SELECT team_role FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        role.as_deref().map(parse_team_role).transpose()
    }

    async fn team_exists(&self, team_id: &TeamId) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teams WHERE team_id = $1)")
                .bind(team_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn list_members(&self, team_id: &TeamId) -> AccountResult<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT m.team_id, m.user_id, u.email, u.full_name, m.team_role
            FROM team_members m
            JOIN users u ON u.user_id = m.user_id
            WHERE m.team_id = $1
            ORDER BY CASE m.team_role WHEN 'owner' THEN 0 WHEN 'admin' THEN 1 ELSE 2 END,
                     u.full_name
            "#,
        )
        .bind(team_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }

    async fn add_member(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        role: TeamRole,
    ) -> AccountResult<()> {
        let result =
            sqlx::query("INSERT INTO team_members (team_id, user_id, team_role) VALUES ($1, $2, $3)")
                .bind(team_id.as_uuid())
                .bind(user_id.as_uuid())
                .bind(role.code())
                .execute(&self.pool)
                .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AccountError::AlreadyMember)
            }
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(AccountError::TeamNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_member_role(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        role: TeamRole,
    ) -> AccountResult<()> {
        let mut tx = self.pool.begin().await?;
        let (current, owners) = Self::lock_member(&mut tx, team_id, user_id).await?;
        ensure_owner_remains(owners, current, Some(role))?;

        sqlx::query("UPDATE team_members SET team_role = $3 WHERE team_id = $1 AND user_id = $2")
            .bind(team_id.as_uuid())
            .bind(user_id.as_uuid())
            .bind(role.code())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn remove_member(&self, team_id: &TeamId, user_id: &UserId) -> AccountResult<()> {
        let mut tx = self.pool.begin().await?;
        let (current, owners) = Self::lock_member(&mut tx, team_id, user_id).await?;
        ensure_owner_remains(owners, current, None)?;

        sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

fn parse_team_role(code: &str) -> AccountResult<TeamRole> {
    TeamRole::from_code(code)
        .ok_or_else(|| AccountError::Internal(format!("Invalid team_role in database: {}", code)))
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    email: String,
    full_name: String,
    phone: Option<String>,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> AccountResult<Profile> {
        let user_role = UserRole::from_code(&self.user_role).ok_or_else(|| {
            AccountError::Internal(format!("Invalid user_role in database: {}", self.user_role))
        })?;

        Ok(Profile {
            user_id: UserId::from_uuid(self.user_id),
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            user_role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    address_id: Uuid,
    user_id: Uuid,
    recipient: String,
    phone: String,
    line1: String,
    line2: Option<String>,
    city: String,
    province: String,
    postal_code: String,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            address_id: AddressId::from_uuid(self.address_id),
            user_id: UserId::from_uuid(self.user_id),
            recipient: self.recipient,
            phone: self.phone,
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            is_default: self.is_default,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    team_id: Uuid,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    team_role: String,
}

impl MembershipRow {
    fn into_membership(self) -> AccountResult<TeamMembership> {
        Ok(TeamMembership {
            role: parse_team_role(&self.team_role)?,
            team: Team {
                team_id: TeamId::from_uuid(self.team_id),
                name: self.name,
                slug: self.slug,
                created_at: self.created_at,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    team_id: Uuid,
    user_id: Uuid,
    email: String,
    full_name: String,
    team_role: String,
}

impl MemberRow {
    fn into_member(self) -> AccountResult<TeamMember> {
        Ok(TeamMember {
            team_id: TeamId::from_uuid(self.team_id),
            user_id: UserId::from_uuid(self.user_id),
            email: self.email,
            full_name: self.full_name,
            team_role: parse_team_role(&self.team_role)?,
        })
    }
}
