//! Application entry point — translate-studio console.
//!
//! A small interactive front-end over the orchestration library. It owns
//! nothing but input parsing and rendering: every command hands primitive
//! inputs (text, a file read from disk, a language code) to the
//! [`Dispatcher`] and every render reads store snapshots back.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the [`HttpBackend`], shared store and [`Dispatcher`].
//! 4. Read line commands from stdin; each dispatch is spawned as an
//!    independent tokio task, so several operations can be in flight at
//!    once and `state` shows whatever each slot last recorded.
//!
//! # Commands
//!
//! ```text
//! detect <text>                 detect the language of <text>
//! translate <target> <text>     translate <text> into <target>
//! speak                         speak the last translation (chained)
//! transcribe <locale> <path>    upload an audio file for transcription
//! caption <path>                upload an image for captioning
//! translate-stt [target]        translate the last transcript (chained)
//! state                         show every operation's current state
//! languages                     list the selectable language codes
//! quit                          exit
//! ```

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use translate_studio::backend::{HttpBackend, OperationKey, Transport, UploadFile};
use translate_studio::config::{languages, AppConfig, STT_LOCALES, TRANSLATE_TARGETS};
use translate_studio::orchestrator::{
    new_shared_store, Dispatcher, OperationInputs, OperationStatus,
};

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("translate-studio starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    log::info!("backend: {}", config.backend.base_url);

    // 3. Backend + dispatcher
    let backend = Arc::new(HttpBackend::from_config(&config.backend));
    let dispatcher = Dispatcher::new(
        new_shared_store(),
        Arc::clone(&backend) as Arc<dyn Transport>,
        config.languages.clone(),
    );

    // The voice for `speak` follows whatever target the user last translated
    // into, starting from the configured default.
    let mut last_target = config.languages.target_language.clone();

    println!("translate-studio — type `help` for commands");

    // 4. Command loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "detect" => {
                let inputs = OperationInputs::text(rest);
                let dispatcher2 = dispatcher.clone();
                run(&dispatcher, &backend, OperationKey::DetectLanguage, async move {
                    dispatcher2.dispatch(OperationKey::DetectLanguage, inputs).await
                });
            }

            "translate" => {
                let (target, text) = match rest.split_once(char::is_whitespace) {
                    Some((target, text)) => (target.trim(), text.trim()),
                    None => {
                        println!("usage: translate <target> <text>");
                        continue;
                    }
                };
                if !languages::is_translate_target(target) {
                    println!("unknown target language `{target}` — see `languages`");
                    continue;
                }
                last_target = target.to_string();
                let inputs = OperationInputs::text(text).with_target_language(target);
                let dispatcher2 = dispatcher.clone();
                run(&dispatcher, &backend, OperationKey::Translate, async move {
                    dispatcher2.dispatch(OperationKey::Translate, inputs).await
                });
            }

            "speak" => {
                let voice = last_target.clone();
                let dispatcher2 = dispatcher.clone();
                run(&dispatcher, &backend, OperationKey::TextToSpeech, async move {
                    dispatcher2.speak_translated(&voice).await
                });
            }

            "transcribe" => {
                let (locale, path) = match rest.split_once(char::is_whitespace) {
                    Some((locale, path)) => (locale.trim(), path.trim()),
                    None => {
                        println!("usage: transcribe <locale> <path>");
                        continue;
                    }
                };
                if !languages::is_stt_locale(locale) {
                    println!("unknown recognition locale `{locale}` — see `languages`");
                    continue;
                }
                let inputs = match read_upload(path).await {
                    Ok(file) => OperationInputs::file(file).with_language_code(locale),
                    Err(e) => {
                        println!("could not read `{path}`: {e}");
                        continue;
                    }
                };
                let dispatcher2 = dispatcher.clone();
                run(&dispatcher, &backend, OperationKey::SpeechToText, async move {
                    dispatcher2.dispatch(OperationKey::SpeechToText, inputs).await
                });
            }

            "caption" => {
                let inputs = match read_upload(rest).await {
                    Ok(file) => OperationInputs::file(file),
                    Err(e) => {
                        println!("could not read `{rest}`: {e}");
                        continue;
                    }
                };
                let dispatcher2 = dispatcher.clone();
                run(&dispatcher, &backend, OperationKey::ImageCaption, async move {
                    dispatcher2.dispatch(OperationKey::ImageCaption, inputs).await
                });
            }

            "translate-stt" => {
                let target = (!rest.is_empty()).then(|| rest.to_string());
                let dispatcher2 = dispatcher.clone();
                run(
                    &dispatcher,
                    &backend,
                    OperationKey::TranslateTranscript,
                    async move {
                        dispatcher2.translate_transcript(target.as_deref()).await
                    },
                );
            }

            "state" => print_state(&dispatcher, &backend),
            "languages" => print_languages(),
            "help" => print_help(),
            "quit" | "exit" => break,

            other => println!("unknown command `{other}` — type `help`"),
        }
    }

    log::info!("translate-studio shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch plumbing
// ---------------------------------------------------------------------------

/// Spawn `work` as its own task unless `key` already has a request in
/// flight. Single-flight-per-key is enforced here, at the front-end
/// boundary; the dispatcher itself stays safe either way.
fn run(
    dispatcher: &Dispatcher,
    backend: &Arc<HttpBackend>,
    key: OperationKey,
    work: impl std::future::Future<Output = ()> + Send + 'static,
) {
    if dispatcher.is_pending(key) {
        println!("{} is still running — try again when it finishes", key.label());
        return;
    }

    let dispatcher = dispatcher.clone();
    let backend = Arc::clone(backend);
    tokio::spawn(async move {
        work.await;
        report_outcome(&dispatcher, &backend, key);
    });
}

/// Print one line describing how `key` ended up after a dispatch.
fn report_outcome(dispatcher: &Dispatcher, backend: &HttpBackend, key: OperationKey) {
    let snap = dispatcher.snapshot(key);
    match snap.status {
        OperationStatus::Succeeded => {
            let value = snap.result_str(key.result_field()).unwrap_or("done");
            let value = if key == OperationKey::TextToSpeech {
                backend.media_url(value)
            } else {
                value.to_string()
            };
            println!("{}: {value}", key.label());
        }
        OperationStatus::Failed => {
            println!("{}: error — {}", key.label(), snap.error.unwrap_or_default());
        }
        // Pending/Idle here means a re-entrant dispatch overwrote the slot.
        _ => {}
    }
}

/// Read a file from disk into an [`UploadFile`].
async fn read_upload(path: &str) -> std::io::Result<UploadFile> {
    if path.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no path given",
        ));
    }
    let bytes = tokio::fs::read(path).await?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(UploadFile::new(file_name, bytes))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn print_state(dispatcher: &Dispatcher, backend: &HttpBackend) {
    for key in OperationKey::ALL {
        let snap = dispatcher.snapshot(key);
        let detail = match snap.status {
            OperationStatus::Succeeded => {
                let value = snap.result_str(key.result_field()).unwrap_or("?");
                if key == OperationKey::TextToSpeech {
                    backend.media_url(value)
                } else {
                    value.to_string()
                }
            }
            OperationStatus::Failed => snap.error.unwrap_or_default(),
            _ => String::new(),
        };
        println!("{:<22} {:<8} {detail}", key.label(), snap.status.label());
    }
}

fn print_languages() {
    println!("translation / speech targets:");
    for lang in TRANSLATE_TARGETS {
        println!("  {:<12} {}", lang.code, lang.name);
    }
    println!("speech-recognition locales:");
    for lang in STT_LOCALES {
        println!("  {:<12} {}", lang.code, lang.name);
    }
}

fn print_help() {
    println!("detect <text>                 detect the language of <text>");
    println!("translate <target> <text>     translate <text> into <target>");
    println!("speak                         speak the last translation");
    println!("transcribe <locale> <path>    upload an audio file for transcription");
    println!("caption <path>                upload an image for captioning");
    println!("translate-stt [target]        translate the last transcript");
    println!("state                         show every operation's current state");
    println!("languages                     list the selectable language codes");
    println!("quit                          exit");
}
