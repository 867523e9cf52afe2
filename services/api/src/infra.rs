use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use invite_gate::invites::{InviteMailer, MailerError, OutboundEmail};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mailer that captures messages instead of calling the provider. Backs the
/// demo command and the route tests.
#[derive(Default)]
pub(crate) struct RecordingMailer {
    outbox: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub(crate) fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}

#[async_trait]
impl InviteMailer for RecordingMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        self.outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(message.clone());
        Ok(())
    }
}
