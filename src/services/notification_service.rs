// src/services/notification_service.rs

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::authentication::Credentials,
};

use crate::{common::error::AppError, db::SettingsRepository};

// Disparo de e-mails de notificação para o endereço configurado pelo
// administrador. Sem SMTP configurado o serviço fica inerte: os avisos
// automáticos viram logs e o envio manual retorna erro.
#[derive(Clone)]
pub struct NotificationService {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
    settings_repo: SettingsRepository,
}

impl NotificationService {
    pub fn new(
        settings_repo: SettingsRepository,
        smtp_host: Option<String>,
        smtp_username: Option<String>,
        smtp_password: Option<String>,
        smtp_from: Option<String>,
    ) -> anyhow::Result<Self> {
        let from = match smtp_from {
            Some(raw) => Some(
                raw.parse::<Mailbox>()
                    .map_err(|e| anyhow::anyhow!("SMTP_FROM inválido: {}", e))?,
            ),
            None => None,
        };

        let mailer = match (&smtp_host, &from) {
            (Some(host), Some(_)) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| anyhow::anyhow!("Falha ao configurar o SMTP: {}", e))?;
                if let (Some(user), Some(pass)) = (smtp_username, smtp_password) {
                    builder = builder.credentials(Credentials::new(user, pass));
                }
                Some(builder.build())
            }
            _ => {
                tracing::info!("SMTP não configurado; envio de e-mail desativado.");
                None
            }
        };

        Ok(Self {
            mailer,
            from,
            settings_repo,
        })
    }

    /// Envia para o e-mail de notificação configurado. Erros são
    /// retornados ao chamador.
    pub async fn send(&self, subject: &str, body: &str) -> Result<(), AppError> {
        let (Some(mailer), Some(from)) = (&self.mailer, &self.from) else {
            return Err(AppError::MailNotConfigured);
        };

        let recipient = self
            .settings_repo
            .notification_email()
            .await?
            .ok_or(AppError::MailNotConfigured)?;

        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| AppError::MailError(format!("destinatário inválido: {}", e)))?;

        let email = Message::builder()
            .from(from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::MailError(e.to_string()))?;

        mailer
            .send(email)
            .await
            .map_err(|e| AppError::MailError(e.to_string()))?;

        tracing::info!("E-mail de notificação enviado: {}", subject);
        Ok(())
    }

    /// Avisos automáticos (novo pedido, nova solicitação): falha de envio
    /// nunca derruba a requisição que a originou.
    pub async fn send_best_effort(&self, subject: &str, body: &str) {
        match self.send(subject, body).await {
            Ok(()) => {}
            Err(AppError::MailNotConfigured) => {
                tracing::debug!("Notificação '{}' descartada: e-mail não configurado.", subject);
            }
            Err(e) => {
                tracing::warn!("Falha ao enviar a notificação '{}': {}", subject, e);
            }
        }
    }
}
