/// Start/stop access to a speech recognizer. Results come back as [`SpeechEvent`]s.
pub trait SpeechCapability {
    fn start(&self) -> Result<(), String>;
    fn stop(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Result(String),
    Ended,
    Error(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceStatus {
    Ready,
    Listening,
    Recognized(String),
    Failed(String),
    Unsupported,
}

impl VoiceStatus {
    pub fn message(&self) -> String {
        match self {
            VoiceStatus::Ready => "Ready to listen…".to_string(),
            VoiceStatus::Listening => "Listening… speak now.".to_string(),
            VoiceStatus::Recognized(text) => format!("Recognized text: \"{text}\""),
            VoiceStatus::Failed(code) => format!("Error: {code}"),
            VoiceStatus::Unsupported => {
                "This browser does not support voice search. Try Google Chrome.".to_string()
            }
        }
    }
}

/// Dictation toggle over an optional recognizer. Without one the bridge stays unsupported.
pub struct VoiceBridge<C> {
    capability: Option<C>,
    state: VoiceState,
    status: VoiceStatus,
    transcript: String,
}

impl<C: SpeechCapability> VoiceBridge<C> {
    pub fn new(capability: Option<C>) -> Self {
        let status = if capability.is_some() {
            VoiceStatus::Ready
        } else {
            VoiceStatus::Unsupported
        };
        Self {
            capability,
            state: VoiceState::Idle,
            status,
            transcript: String::new(),
        }
    }

    pub fn capability(&self) -> Option<&C> {
        self.capability.as_ref()
    }

    pub fn is_supported(&self) -> bool {
        self.capability.is_some()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn status(&self) -> &VoiceStatus {
        &self.status
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// The transcript box is editable so users can correct what was heard.
    pub fn set_transcript(&mut self, text: String) {
        self.transcript = text;
    }

    pub fn toggle(&mut self) {
        let Some(capability) = &self.capability else {
            return;
        };
        match self.state {
            VoiceState::Listening => capability.stop(),
            VoiceState::Idle => match capability.start() {
                // Marked listening right away so a second toggle stops instead of restarting.
                Ok(()) => self.state = VoiceState::Listening,
                Err(code) => self.status = VoiceStatus::Failed(code),
            },
        }
    }

    pub fn handle(&mut self, event: SpeechEvent) {
        if !self.is_supported() {
            return;
        }
        match event {
            SpeechEvent::Started => {
                self.state = VoiceState::Listening;
                self.status = VoiceStatus::Listening;
            }
            SpeechEvent::Result(text) => {
                self.status = VoiceStatus::Recognized(text.clone());
                self.transcript = text;
            }
            SpeechEvent::Ended => {
                self.state = VoiceState::Idle;
                if self.status == VoiceStatus::Listening {
                    self.status = VoiceStatus::Ready;
                }
            }
            SpeechEvent::Error(code) => {
                self.state = VoiceState::Idle;
                self.status = VoiceStatus::Failed(code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeRecognizer {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_start: Option<String>,
    }

    impl SpeechCapability for FakeRecognizer {
        fn start(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("start");
            match &self.fail_start {
                Some(code) => Err(code.clone()),
                None => Ok(()),
            }
        }

        fn stop(&self) {
            self.calls.borrow_mut().push("stop");
        }
    }

    #[test]
    fn unsupported_toggle_is_a_no_op() {
        let mut bridge: VoiceBridge<FakeRecognizer> = VoiceBridge::new(None);
        bridge.toggle();
        bridge.handle(SpeechEvent::Started);
        assert_eq!(bridge.state(), VoiceState::Idle);
        assert_eq!(bridge.status(), &VoiceStatus::Unsupported);
        assert!(!bridge.is_supported());
    }

    #[test]
    fn toggle_starts_then_stops() {
        let fake = FakeRecognizer::default();
        let mut bridge = VoiceBridge::new(Some(fake.clone()));

        bridge.toggle();
        assert_eq!(bridge.state(), VoiceState::Listening);
        bridge.handle(SpeechEvent::Started);
        assert_eq!(bridge.status(), &VoiceStatus::Listening);

        bridge.toggle();
        assert_eq!(*fake.calls.borrow(), vec!["start", "stop"]);
        bridge.handle(SpeechEvent::Ended);
        assert_eq!(bridge.state(), VoiceState::Idle);
        assert_eq!(bridge.status(), &VoiceStatus::Ready);
    }

    #[test]
    fn result_survives_end_of_capture() {
        let mut bridge = VoiceBridge::new(Some(FakeRecognizer::default()));
        bridge.toggle();
        bridge.handle(SpeechEvent::Started);
        bridge.handle(SpeechEvent::Result("budget report".to_string()));
        bridge.handle(SpeechEvent::Ended);

        assert_eq!(bridge.transcript(), "budget report");
        assert_eq!(
            bridge.status(),
            &VoiceStatus::Recognized("budget report".to_string())
        );
        assert_eq!(bridge.state(), VoiceState::Idle);
    }

    #[test]
    fn error_clears_listening_and_reports_code() {
        let mut bridge = VoiceBridge::new(Some(FakeRecognizer::default()));
        bridge.toggle();
        bridge.handle(SpeechEvent::Started);
        bridge.handle(SpeechEvent::Error("no-speech".to_string()));
        bridge.handle(SpeechEvent::Ended);

        assert_eq!(bridge.state(), VoiceState::Idle);
        assert_eq!(bridge.status().message(), "Error: no-speech");
    }

    #[test]
    fn failed_start_stays_idle() {
        let fake = FakeRecognizer {
            fail_start: Some("not-allowed".to_string()),
            ..Default::default()
        };
        let mut bridge = VoiceBridge::new(Some(fake));
        bridge.toggle();
        assert_eq!(bridge.state(), VoiceState::Idle);
        assert_eq!(
            bridge.status(),
            &VoiceStatus::Failed("not-allowed".to_string())
        );
    }
}
