use js_sys::{Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::voice::{SpeechCapability, SpeechEvent};

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

/// The browser's Web Speech recognizer, reached through reflection since the API is
/// still prefixed in Chromium.
#[derive(Clone)]
pub struct BrowserSpeech {
    recognition: JsValue,
}

impl BrowserSpeech {
    /// `None` when the page has no recognizer.
    pub fn detect(lang: &str) -> Option<Self> {
        let window = web_sys::window()?;
        let ctor = CONSTRUCTORS.iter().find_map(|name| {
            Reflect::get(&window, &JsValue::from_str(name))
                .ok()
                .filter(|value| value.is_function())
        })?;
        let ctor: Function = ctor.unchecked_into();
        let recognition = Reflect::construct(&ctor, &js_sys::Array::new()).ok()?;

        let speech = Self { recognition };
        speech.set("lang", &JsValue::from_str(lang));
        speech.set("interimResults", &JsValue::FALSE);
        speech.set("maxAlternatives", &JsValue::from_f64(1.0));
        Some(speech)
    }

    /// Route recognizer callbacks into `sink`. Handlers live as long as the page.
    pub fn listen(&self, sink: impl Fn(SpeechEvent) + 'static) {
        let sink = Rc::new(sink);

        let on_start = Rc::clone(&sink);
        self.on("onstart", move |_| on_start(SpeechEvent::Started));

        let on_end = Rc::clone(&sink);
        self.on("onend", move |_| on_end(SpeechEvent::Ended));

        let on_error = Rc::clone(&sink);
        self.on("onerror", move |event| {
            let code = Reflect::get(&event, &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            leptos::logging::warn!("Speech recognition error: {}", code);
            on_error(SpeechEvent::Error(code));
        });

        self.on("onresult", move |event| {
            if let Some(transcript) = best_transcript(&event) {
                sink(SpeechEvent::Result(transcript));
            }
        });
    }

    fn set(&self, key: &str, value: &JsValue) {
        let _ = Reflect::set(&self.recognition, &JsValue::from_str(key), value);
    }

    fn on(&self, key: &str, handler: impl FnMut(JsValue) + 'static) {
        let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
        self.set(key, closure.as_ref());
        closure.forget();
    }

    fn call(&self, method: &str) -> Result<(), String> {
        let function = Reflect::get(&self.recognition, &JsValue::from_str(method))
            .map_err(|e| format!("{e:?}"))?
            .dyn_into::<Function>()
            .map_err(|_| format!("recognizer has no {method}()"))?;
        function
            .call0(&self.recognition)
            .map(|_| ())
            .map_err(|e| e.as_string().unwrap_or_else(|| format!("{e:?}")))
    }
}

// event.results[0][0].transcript
fn best_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let first = Reflect::get(&results, &JsValue::from_f64(0.0)).ok()?;
    let alternative = Reflect::get(&first, &JsValue::from_f64(0.0)).ok()?;
    Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

impl SpeechCapability for BrowserSpeech {
    fn start(&self) -> Result<(), String> {
        self.call("start")
    }

    fn stop(&self) {
        if let Err(e) = self.call("stop") {
            leptos::logging::warn!("Could not stop speech recognition: {}", e);
        }
    }
}
