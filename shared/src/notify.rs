use strum_macros::AsRefStr;

/// Icon the UI should show next to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum IconHint {
    Alert,
    Warning,
    Offline,
}

/// Receives user-facing feedback. The core never renders anything itself.
pub trait NotificationSink {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str, icon: IconHint);
}

/// Sink that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify_success(&self, message: &str) {
        log::info!("{}", message);
    }

    fn notify_error(&self, message: &str, icon: IconHint) {
        match icon {
            IconHint::Warning => log::warn!("{}", message),
            IconHint::Alert | IconHint::Offline => log::error!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;
    use crate::form::UploadForm;
    use crate::config::ApiConfig;
    use crate::file::InMemoryFile;
    use crate::mode::UploadMode;
    use crate::session::UploadSession;
    use crate::testing::ScriptedTransport;
    use futures::executor::block_on;

    #[test]
    fn test_icon_hint_css_names() {
        assert_eq!(IconHint::Alert.as_ref(), "alert");
        assert_eq!(IconHint::Offline.as_ref(), "offline");
    }

    #[test]
    fn test_log_sink_drives_a_session() {
        let session: UploadSession<InMemoryFile, _, _> = UploadSession::new(
            UploadForm::new(ApiConfig::default(), UploadMode::Dataset),
            ScriptedTransport::new(Vec::new()),
            LogSink,
        );

        let result = block_on(session.submit());
        assert!(matches!(result, Err(SubmissionError::Validation(_))));
    }
}
