// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::{DealerRepository, SettingsRepository},
    models::auth::{Claims, Dealer, Role},
};

const TOKEN_VALIDITY_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    dealer_repo: DealerRepository,
    settings_repo: SettingsRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        dealer_repo: DealerRepository,
        settings_repo: SettingsRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            dealer_repo,
            settings_repo,
            jwt_secret,
        }
    }

    pub async fn dealer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, Dealer), AppError> {
        let dealer = self
            .dealer_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Concessionária criada sem senha ainda não pode entrar.
        if dealer.password_hash.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = dealer.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(dealer.id.to_string(), Role::Dealer)?;
        Ok((token, dealer))
    }

    pub async fn admin_login(&self, password: &str) -> Result<String, AppError> {
        if !self.verify_admin_password(password).await? {
            return Err(AppError::InvalidCredentials);
        }
        self.create_token("admin".to_string(), Role::Admin)
    }

    /// A senha armazenada pode ser um hash bcrypt ou o valor semeado em
    /// texto plano; a primeira troca grava um hash.
    async fn verify_admin_password(&self, password: &str) -> Result<bool, AppError> {
        let stored = self.settings_repo.admin_password().await?;

        if stored.starts_with("$2") {
            let password_clone = password.to_owned();
            let valid =
                tokio::task::spawn_blocking(move || verify(&password_clone, &stored))
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
            Ok(valid)
        } else {
            Ok(stored == password)
        }
    }

    pub async fn change_admin_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !self.verify_admin_password(current_password).await? {
            return Err(AppError::InvalidCredentials);
        }

        let hashed = self.hash_password(new_password.to_owned()).await?;
        self.settings_repo
            .upsert(crate::db::settings_repo::ADMIN_PASSWORD_KEY, &hashed)
            .await
    }

    pub async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    fn create_token(&self, sub: String, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_VALIDITY_DAYS);

        let claims = Claims {
            sub,
            role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
